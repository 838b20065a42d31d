//! DynamoDB record adapter.

use std::collections::HashMap;

use anyhow::{Context, Result};
use aws_sdk_dynamodb::types::AttributeValue;

use super::AwsControlPlane;
use crate::application::ports::RecordStore;

impl RecordStore for AwsControlPlane {
    async fn put_record(&self, table: &str, fields: &[(&str, &str)]) -> Result<()> {
        let item: HashMap<String, AttributeValue> = fields
            .iter()
            .map(|(k, v)| ((*k).to_owned(), AttributeValue::S((*v).to_owned())))
            .collect();
        self.dynamo
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .with_context(|| format!("inserting record into table '{table}'"))?;
        Ok(())
    }
}
