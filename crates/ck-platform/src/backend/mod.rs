mod local_backend;

pub use local_backend::LocalBackend;
