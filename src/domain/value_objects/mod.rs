pub mod dotted_path;
