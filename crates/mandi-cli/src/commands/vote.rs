//! Vote command implementation.

use crate::cli::{TargetKind, VoteArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::input::now;
use crate::output::Formatter;
use mandi_domain::traits::{PostStore, SupplierStore, VoteStore};
use mandi_domain::{PostId, SupplierId, VoteChange, VoteTarget};
use mandi_store::SqliteStore;

/// Execute the vote command.
///
/// Returns the transition and the target's counters afterwards.
pub async fn execute_vote(
    args: VoteArgs,
    store: &mut SqliteStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<(VoteChange, (u32, u32))> {
    let user = config.user(args.user.as_deref())?;
    let target = match args.kind {
        TargetKind::Post => VoteTarget::Post(PostId::from(args.id)),
        TargetKind::Supplier => VoteTarget::Supplier(SupplierId::from(args.id)),
    };

    let change = store.cast_vote(&user, &target, args.direction.into(), now())?;
    let counters = counters(store, &target)?;

    println!("{}", formatter.format_vote(&target, &change, counters)?);

    Ok((change, counters))
}

fn counters(store: &SqliteStore, target: &VoteTarget) -> Result<(u32, u32)> {
    match target {
        VoteTarget::Post(id) => store
            .get_post(id)?
            .map(|p| (p.likes, p.dislikes))
            .ok_or_else(|| CliError::NotFound(format!("post {}", id))),
        VoteTarget::Supplier(id) => store
            .get_supplier(id)?
            .map(|s| (s.thumbs_up, s.thumbs_down))
            .ok_or_else(|| CliError::NotFound(format!("supplier {}", id))),
    }
}
