use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in warehouse access: {0}")]
pub struct WarehouseError(pub String);
impl From<rusqlite::Error> for WarehouseError {
    fn from(e: rusqlite::Error) -> WarehouseError {
        WarehouseError(format!("sqlite error: {}", e.to_string()))
    }
}
