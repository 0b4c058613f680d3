/// Database models (the persistence gateway)
///
/// Every operation takes a borrowed pool, runs as a single statement or a
/// single transaction, and reports failures as
/// [`StoreError`](crate::db::error::StoreError).
///
/// # Models
///
/// - `user`: Accounts and password digests
/// - `team`: Teams and their owning user
/// - `team_member`: Capacity-bounded member records
/// - `document`: Write-only document paths
///
/// # Example
///
/// ```no_run
/// use teamreg_shared::models::team::Team;
/// use teamreg_shared::ids::RecordId;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let owner = RecordId::new("123456");
/// let team_id = Team::create(&pool, &owner, "Team A").await?;
/// assert_eq!(Team::find_owner(&pool, &team_id).await?, owner);
/// # Ok(())
/// # }
/// ```

pub mod document;
pub mod team;
pub mod team_member;
pub mod user;
