pub mod damage_app;
pub mod views;

pub use damage_app::DamageApp;
pub use views::results_view::ResultsView;
pub use views::upload_view::UploadView;
