use anyhow::Result;

use super::{Context, InputArgs};

pub fn share(
    ctx: &Context,
    input: &InputArgs,
    base_url: Option<&str>,
    token_only: bool,
) -> Result<String> {
    let session = ctx.open_session(input)?;
    if token_only {
        return Ok(session.share_token());
    }
    let base = base_url.unwrap_or(&ctx.settings.share_base_url);
    Ok(session.share_link(base))
}
