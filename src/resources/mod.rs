//! One method per remote operation, grouped by resource.

mod agents;
mod calls;
mod conversations;
mod credits;
mod phone_numbers;
mod usage;
mod user_webhooks;
mod webhooks;

use crate::Result;
use crate::models::common::require_non_empty;

/// Reject ids that would collapse the path onto the collection.
#[allow(clippy::result_large_err)]
fn resource_id<'a>(field: &str, id: &'a str) -> Result<&'a str> {
    require_non_empty(field, id)?;
    Ok(id)
}
