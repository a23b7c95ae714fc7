use miette::Result;
use mvnpub_util::errors::MvnpubError;

pub fn exec(group: Option<&str>, artifact: Option<&str>) -> Result<()> {
    let cwd = std::env::current_dir().map_err(MvnpubError::Io)?;
    mvnpub_ops::ops_init::init(&cwd, group, artifact)
}
