pub mod ops_env;
pub mod ops_init;
pub mod ops_pom;
pub mod ops_publish;
pub mod project;
