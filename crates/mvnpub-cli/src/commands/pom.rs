use miette::Result;
use mvnpub_ops::project::Project;

pub fn exec(version: Option<&str>) -> Result<()> {
    let project = Project::load(&super::project_root()?, &[])?;
    print!("{}", mvnpub_ops::ops_pom::pom(&project, version)?);
    Ok(())
}
