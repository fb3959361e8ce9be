use anyhow::Result;
use tracing::warn;

use super::{Context, InputArgs};

pub fn checkout(
    ctx: &Context,
    input: &InputArgs,
    store_url: Option<&str>,
    json: bool,
) -> Result<String> {
    let session = ctx.open_session(input)?;
    let cart = session.checkout()?;

    if !cart.dropped.is_empty() {
        warn!(
            "Not available online, buy separately: {}",
            cart.dropped.join(", ")
        );
    }

    if json {
        return Ok(cart.to_json()?);
    }
    let store = store_url.unwrap_or(&ctx.settings.store_base_url);
    Ok(cart.checkout_url(store))
}
