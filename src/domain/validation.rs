use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    NoRecipients,
    InvalidPhoneNumber { input: String },
    DelimiterInListValue { param: String, delimiter: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::NoRecipients => write!(f, "at least one recipient is required"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::DelimiterInListValue { param, delimiter } => {
                write!(
                    f,
                    "list parameter {param} contains an element with the join delimiter {delimiter:?}"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "user" };
        assert_eq!(err.to_string(), "user must not be empty");

        let err = ValidationError::NoRecipients;
        assert_eq!(err.to_string(), "at least one recipient is required");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::DelimiterInListValue {
            param: "recipients".to_owned(),
            delimiter: ",",
        };
        assert_eq!(
            err.to_string(),
            "list parameter recipients contains an element with the join delimiter \",\""
        );
    }
}
