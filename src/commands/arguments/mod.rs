use super::CommandError;

mod embedded_number;
mod manual_datetime;

pub use embedded_number::EmbeddedNumber;
pub use manual_datetime::ManualDateTime;

pub fn invalid_argument(message: String) -> CommandError {
    CommandError::InvalidArgument { message }
}
