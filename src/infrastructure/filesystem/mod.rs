pub mod project_directory;
