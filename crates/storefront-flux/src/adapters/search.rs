use crate::state::{Product, Query, Template};
use serde_json::Value;
use storefront_client::{BackendTemplate, Record, SearchResponse};

/// Query section of a response; `original` is what the request asked for
pub fn extract_query(original: Option<&str>, response: &SearchResponse) -> Query {
    Query {
        original: original
            .map(str::to_string)
            .or_else(|| response.original_query.clone()),
        corrected: response.corrected_query.clone(),
        related: response.related_queries.clone(),
        did_you_mean: response.did_you_mean.clone(),
        rewrites: response.rewrites.clone(),
    }
}

/// Wrap raw records as products, passing their metadata through
pub fn augment_products(records: &[Record]) -> Vec<Product> {
    records
        .iter()
        .map(|record| {
            let mut data = record.all_meta.clone();
            if let Some(id) = &record.id {
                data.entry("id").or_insert_with(|| Value::String(id.clone()));
            }
            Product { data }
        })
        .collect()
}

pub fn extract_template(template: &BackendTemplate) -> Template {
    Template {
        name: template.name.clone(),
        rule_name: template.rule_name.clone(),
        zones: template.zones.clone(),
    }
}
