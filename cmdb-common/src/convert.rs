use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;

/// 按字段名把一个结构体的数据拷贝到另一个结构体
///
/// The destination's `Default` value supplies every field the source does not
/// carry, so命令对象和实体字段不必一一对应. Keys are matched in snake_case
/// regardless of the serde casing either side uses.
pub fn copy<S, D>(source: &S) -> Result<D, Box<dyn Error>>
where
    S: Serialize,
    D: DeserializeOwned + Serialize + Default,
{
    let Value::Object(base) = serde_json::to_value(D::default())? else {
        return Err("copy destination must be a struct".into());
    };
    let Value::Object(src) = serde_json::to_value(source)? else {
        return Err("copy source must be a struct".into());
    };

    // index source entries by snake_case name
    let mut by_snake = Map::with_capacity(src.len());
    for (k, v) in src {
        by_snake.insert(to_snake(&k), v);
    }

    let mut merged = Map::with_capacity(base.len());
    for (k, default_value) in base {
        let value = match by_snake.get(&to_snake(&k)) {
            Some(v) if !v.is_null() => v.clone(),
            _ => default_value,
        };
        merged.insert(k, value);
    }
    Ok(serde_json::from_value(Value::Object(merged))?)
}

pub fn to_snake(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for (i, c) in input.chars().enumerate() {
        if c.is_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Cmd {
        asset_name: String,
        manage_ip: Option<String>,
        price: Option<f64>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Model {
        asset_name: String,
        manage_ip: Option<String>,
        price: Option<f64>,
        memo: Option<String>,
    }

    #[test]
    fn copies_matching_fields_and_keeps_defaults() {
        let cmd = Cmd {
            asset_name: "web-01".to_string(),
            manage_ip: None,
            price: Some(1999.0),
        };
        let model: Model = copy(&cmd).unwrap();
        assert_eq!(model.asset_name, "web-01");
        assert_eq!(model.manage_ip, None);
        assert_eq!(model.price, Some(1999.0));
        assert_eq!(model.memo, None);
    }

    #[test]
    fn snake_case_conversion() {
        assert_eq!(to_snake("assetName"), "asset_name");
        assert_eq!(to_snake("sn"), "sn");
    }
}
