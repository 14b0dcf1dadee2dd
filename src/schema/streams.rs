//! Stream definitions

use super::types::{JsonSchema, SchemaProperty};
use crate::decode::RecordPath;
use crate::error::Result;
use crate::types::ReplicationMethod;

/// Name of the worker stream
pub const HUMANRESOURCES_STREAM: &str = "humanresources";

/// Primary key of a worker record
pub const WORKER_ID_KEY: &str = "wd_Worker_ID";

/// Selects each worker's data node from the worker collection
pub const DEFAULT_RECORD_PATH: &str = "$[*].wd_Worker_Data";

/// A stream the tap can extract
#[derive(Debug, Clone)]
pub struct StreamDefinition {
    /// Stream name
    pub name: String,
    /// Primary key fields
    pub key_properties: Vec<String>,
    /// How records are selected from the worker collection
    pub record_path: RecordPath,
    /// Replication method
    pub replication_method: ReplicationMethod,
    /// Declared record schema
    pub schema: JsonSchema,
}

impl StreamDefinition {
    /// Override the record path
    pub fn with_record_path(mut self, path: &str) -> Result<Self> {
        self.record_path = RecordPath::parse(path)?;
        Ok(self)
    }

    /// Schema as JSON
    pub fn schema_json(&self) -> serde_json::Value {
        self.schema.to_json()
    }
}

/// The `humanresources` stream: one record per active worker
pub fn humanresources() -> Result<StreamDefinition> {
    Ok(StreamDefinition {
        name: HUMANRESOURCES_STREAM.to_string(),
        key_properties: vec![WORKER_ID_KEY.to_string()],
        record_path: RecordPath::parse(DEFAULT_RECORD_PATH)?,
        replication_method: ReplicationMethod::FullTable,
        schema: humanresources_schema(),
    })
}

/// Every stream the tap exposes
pub fn all_streams() -> Result<Vec<StreamDefinition>> {
    Ok(vec![humanresources()?])
}

/// Declared schema of a worker record
///
/// Keys are the normalized element names; attributes carry an `@` prefix.
pub fn humanresources_schema() -> JsonSchema {
    let name_detail = SchemaProperty::object([
        ("@wd_Formatted_Name", SchemaProperty::string()),
        ("@wd_Reporting_Name", SchemaProperty::string()),
    ]);

    let personal = SchemaProperty::object([(
        "wd_Name_Data",
        SchemaProperty::object([(
            "wd_Legal_Name_Data",
            SchemaProperty::object([("wd_Name_Detail_Data", name_detail)]),
        )]),
    )]);

    let position = SchemaProperty::object([
        ("@wd_Effective_Date", SchemaProperty::string()),
        ("wd_Position_ID", SchemaProperty::string()),
        ("wd_Position_Title", SchemaProperty::string()),
        ("wd_Start_Date", SchemaProperty::string()),
    ]);

    let employment = SchemaProperty::object([(
        "wd_Worker_Job_Data",
        SchemaProperty::object([
            ("@wd_Primary_Job", SchemaProperty::string()),
            ("wd_Position_Data", position),
        ]),
    )]);

    let account = SchemaProperty::object([
        ("wd_User_Name", SchemaProperty::string()),
        (
            "wd_Show_User_Name_in_Simplified_View",
            SchemaProperty::string(),
        ),
    ]);

    let mut schema = JsonSchema::new()
        .with_property(
            WORKER_ID_KEY,
            SchemaProperty::string().with_description("Worker identifier"),
        )
        .with_property("wd_User_ID", SchemaProperty::string())
        .with_property("wd_Personal_Data", personal)
        .with_property("wd_Employment_Data", employment)
        .with_property("wd_User_Account_Data", account);
    schema.add_required(WORKER_ID_KEY);
    schema
}
