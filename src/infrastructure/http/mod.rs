pub mod template_catalog;
