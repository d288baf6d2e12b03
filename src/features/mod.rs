/// Feature modules
pub mod todos;
