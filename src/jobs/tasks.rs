/// Background task implementations
use crate::{context::AppContext, error::VaultResult};

/// Run the retention sweep on behalf of the scheduler
pub async fn expire_old_files(ctx: &AppContext) -> VaultResult<u64> {
    ctx.file_manager.cleanup("scheduled").await
}
