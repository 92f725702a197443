use super::objects::Session;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
#[error("Access denied: {0}")]
pub struct AccessDeniedError(pub String);

pub trait AccessControl {
    fn check_can_show_tables(
        &self,
        session: &Session,
        schema: &str,
    ) -> Result<(), AccessDeniedError>;
}

pub struct AllowAllAccessControl;

impl AccessControl for AllowAllAccessControl {
    fn check_can_show_tables(
        &self,
        _session: &Session,
        _schema: &str,
    ) -> Result<(), AccessDeniedError> {
        Ok(())
    }
}
