use hd_auth::Desk;
use hd_core::enums::{Page, Role};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct NavResponse {
    role: Role,
    pages: &'static [Page],
    assignable_roles: &'static [Role],
}

/// Handle `hdk nav`: what the signed-in user can reach.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = ctx.session.require_actor()?;
    output(
        &NavResponse {
            role: actor.role,
            pages: Desk::<hd_db::HelpdeskService>::navigation(&actor),
            assignable_roles: Desk::<hd_db::HelpdeskService>::assignable_roles(&actor),
        },
        flags.format,
    )
}
