// ABOUTME: New command: scaffold a project or container manifest for the current scope.
// ABOUTME: Container scaffolding needs the remote registry; project scaffolding is local only.

use std::env;

use tether::api::Client;
use tether::config::Global;
use tether::context::{Context, Scope};
use tether::error::{Error, Result};
use tether::scaffold::{self, ScaffoldError};

pub async fn new_resource() -> Result<()> {
    let cwd = env::current_dir()?;
    let context = Context::load(&cwd);

    match context.scope {
        Scope::Global => scaffold::new_project(&context, &cwd).map_err(Error::from),
        Scope::Project => {
            let global = Global::load()?;
            let client = Client::new(&global)?;
            scaffold::new_container(&client, &context, &cwd)
                .await
                .map_err(Error::from)
        }
        Scope::Container => Err(ScaffoldError::ResourceExists.into()),
    }
}
