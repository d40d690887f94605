use crate::domain::RequestParams;

pub fn encode_code_params(key: &str, code: &str) -> RequestParams {
    let mut params = RequestParams::new();
    params.push("key", key);
    params.push("code", code);
    params
}
