use console::Style;
use miette::Result;

use mvnpub_core::PROPERTIES_FILE;
use mvnpub_ops::ops_env;
use mvnpub_ops::project::Project;

pub fn exec(reveal: bool) -> Result<()> {
    let project_root = super::project_root()?;
    let project = Project::load(&project_root, &[])?;
    let entries = ops_env::env(&project);

    println!(
        "Property store: {} ({} entries)",
        project_root.join(PROPERTIES_FILE).display(),
        project.properties.len()
    );

    let dim = Style::new().dim();
    for entry in &entries {
        match entry.resolved {
            Some(ref resolved) => {
                let value = if reveal { resolved.value.as_str() } else { "********" };
                println!(
                    "  {:<17} {} = {} {}",
                    entry.role,
                    entry.name,
                    value,
                    dim.apply_to(format!("({})", resolved.source))
                );
            }
            None => println!(
                "  {:<17} {} {}",
                entry.role,
                entry.name,
                dim.apply_to("(unset)")
            ),
        }
    }

    Ok(())
}
