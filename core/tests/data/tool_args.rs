// Generated from the `tool` argument schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolArgs {
    pub input: String,
    pub output: Option<String>,
    pub verbose: bool,
    pub repeat: Option<i64>,
    pub level: Option<String>,
    pub r#type: Option<f64>,
}

impl argschema_core::FromParsedArgs for ToolArgs {
    fn from_parsed(
        args: &argschema_core::ParsedArgs,
    ) -> Result<Self, argschema_core::RecordError> {
        Ok(Self {
            input: args.get("input")?,
            output: args.get("output")?,
            verbose: args.get("verbose")?,
            repeat: args.get("repeat")?,
            level: args.get("level")?,
            r#type: args.get("type")?,
        })
    }
}
