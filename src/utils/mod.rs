pub mod logging;
pub mod tmpl;
