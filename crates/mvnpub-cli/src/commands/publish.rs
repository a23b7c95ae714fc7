//! Handler for `mvnpub publish`.

use miette::Result;
use mvnpub_ops::ops_publish::{self, PublishOptions};
use mvnpub_util::errors::MvnpubError;

pub fn exec(opts: PublishOptions) -> Result<()> {
    let project_root = super::project_root()?;

    let rt = tokio::runtime::Runtime::new().map_err(|e| MvnpubError::Generic {
        message: format!("Failed to start async runtime: {e}"),
    })?;

    rt.block_on(ops_publish::publish(&project_root, &opts))?;
    Ok(())
}
