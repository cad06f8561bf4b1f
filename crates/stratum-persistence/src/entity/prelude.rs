pub use super::access_token::Entity as AccessToken;
pub use super::account::Entity as Account;
pub use super::country::Entity as Country;
pub use super::data_grid::Entity as DataGrid;
pub use super::data_grid_filter::Entity as DataGridFilter;
pub use super::notification::Entity as Notification;
