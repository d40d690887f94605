use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Delimiter used when a list-valued parameter is flattened for the wire.
///
/// Historical gateway clients disagreed on this; the comma form is the
/// documented default, the comma-plus-space form is kept for compatibility
/// with the variant that used it.
pub enum JoinStyle {
    #[default]
    Comma,
    CommaSpace,
}

impl JoinStyle {
    /// The literal delimiter inserted between list elements.
    pub fn delimiter(self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::CommaSpace => ", ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single request parameter value: a scalar, or a list joined on flatten.
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Insertion-ordered parameter map for one API call.
///
/// Order is part of the wire contract: the signed-request mode hashes
/// parameter values in mapping order, so two maps with the same entries in a
/// different order produce different signatures.
pub struct RequestParams {
    entries: Vec<(String, ParamValue)>,
}

impl RequestParams {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scalar parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .push((name.into(), ParamValue::Scalar(value.into())));
    }

    /// Append a scalar parameter when the value is present.
    pub fn push_opt(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    /// Append a list parameter; elements are joined on flatten.
    pub fn push_list<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.push((
            name.into(),
            ParamValue::List(values.into_iter().map(Into::into).collect()),
        ));
    }

    /// Append every entry of `other`, preserving its order.
    pub fn extend(&mut self, other: RequestParams) {
        self.entries.extend(other.entries);
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the entries in insertion order.
    pub fn entries(&self) -> &[(String, ParamValue)] {
        &self.entries
    }

    /// Flatten into wire-ready `(name, value)` pairs.
    ///
    /// Lists are joined with the `style` delimiter. A list element containing
    /// the delimiter would be indistinguishable from two elements on decode,
    /// so it is rejected instead of transmitted.
    pub fn flatten(&self, style: JoinStyle) -> Result<Vec<(String, String)>, ValidationError> {
        let delimiter = style.delimiter();
        self.entries
            .iter()
            .map(|(name, value)| {
                let flat = match value {
                    ParamValue::Scalar(scalar) => scalar.clone(),
                    ParamValue::List(elements) => {
                        for element in elements {
                            if element.contains(delimiter) {
                                return Err(ValidationError::DelimiterInListValue {
                                    param: name.clone(),
                                    delimiter,
                                });
                            }
                        }
                        elements.join(delimiter)
                    }
                };
                Ok((name.clone(), flat))
            })
            .collect()
    }
}

impl<N, V> FromIterator<(N, V)> for RequestParams
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.push(name, value);
        }
        params
    }
}
