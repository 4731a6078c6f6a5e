pub mod certificate_repo;
pub mod template_repo;

pub use certificate_repo::CertificateRepo;
pub use template_repo::TemplateRepo;
