use serde_json::{json, Value};
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&success_body(message, data))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

fn success_body(message: &str, data: Option<Value>) -> Value {
    let mut response = json!({
        "success": true,
        "message": message
    });

    if let (Some(Value::Object(extra)), Some(fields)) = (data, response.as_object_mut()) {
        fields.extend(extra);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_merges_object_data() {
        let body = success_body("Seeded", Some(json!({ "inserted": 10 })));
        assert_eq!(body, json!({ "success": true, "message": "Seeded", "inserted": 10 }));
    }

    #[test]
    fn success_body_ignores_non_object_data() {
        let body = success_body("Done", Some(json!([1, 2])));
        assert_eq!(body, json!({ "success": true, "message": "Done" }));
    }
}
