use rueda_io::DecodeOptions;
use rueda_store::{InvoicePolicy, ProductType};
use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// Attribute columns of the stock tyre sheet, starting at column D.
pub const DEFAULT_ATTRIBUTES: [&str; 13] = [
    "Carga",
    "Velocidad",
    "Marca",
    "Peso",
    "Diámetro",
    "Ancho",
    "Alto",
    "Impuesto",
    "Ruido",
    "Consumo",
    "Frenado",
    "Temporada",
    "Segmento",
];

const FIRST_ATTRIBUTE_COLUMN: usize = 3;

// ---------------------------------------------------------------------------
// Top-level profile
// ---------------------------------------------------------------------------

/// Describes how a worksheet maps onto catalog records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportProfile {
    pub name: String,
    /// Leading rows to skip before data starts.
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
    /// Worksheet index, 0-based.
    #[serde(default)]
    pub sheet: usize,
    #[serde(default)]
    pub columns: ColumnLayout,
    #[serde(default)]
    pub product: ProductDefaults,
    #[serde(default)]
    pub attributes: Vec<AttributeColumn>,
}

fn default_header_rows() -> usize {
    1
}

impl Default for ImportProfile {
    fn default() -> Self {
        Self {
            name: "Tyres".into(),
            header_rows: default_header_rows(),
            sheet: 0,
            columns: ColumnLayout::default(),
            product: ProductDefaults::default(),
            attributes: DEFAULT_ATTRIBUTES
                .iter()
                .enumerate()
                .map(|(i, name)| AttributeColumn {
                    column: FIRST_ATTRIBUTE_COLUMN + i,
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Fixed product columns, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub code: usize,
    pub barcode: usize,
    pub name: usize,
    pub description: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self { code: 0, barcode: 1, name: 2, description: 16 }
    }
}

impl ColumnLayout {
    fn fixed(&self) -> [(&'static str, usize); 4] {
        [
            ("code", self.code),
            ("barcode", self.barcode),
            ("name", self.name),
            ("description", self.description),
        ]
    }
}

/// One spreadsheet column holding values of a named attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeColumn {
    pub column: usize,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Product defaults
// ---------------------------------------------------------------------------

/// Policy fields stamped on every product the import creates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDefaults {
    #[serde(default)]
    pub detailed_type: ProductType,
    #[serde(default)]
    pub invoice_policy: InvoicePolicy,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ImportProfile {
    pub fn from_toml(input: &str) -> Result<Self, ImportError> {
        let profile: ImportProfile =
            toml::from_str(input).map_err(|e| ImportError::ConfigParse(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn to_toml(&self) -> Result<String, ImportError> {
        toml::to_string_pretty(self).map_err(|e| ImportError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ImportError> {
        let fixed = self.columns.fixed();

        // Fixed columns must not share a position
        for (i, (a_name, a_col)) in fixed.iter().enumerate() {
            if let Some((b_name, _)) = fixed[i + 1..].iter().find(|(_, b_col)| b_col == a_col) {
                return Err(ImportError::ConfigValidation(format!(
                    "columns '{a_name}' and '{b_name}' both use column {a_col}"
                )));
            }
        }

        for (i, attr) in self.attributes.iter().enumerate() {
            if attr.name.is_empty() {
                return Err(ImportError::ConfigValidation(format!(
                    "attribute in column {} has an empty name",
                    attr.column
                )));
            }
            if let Some((fixed_name, _)) = fixed.iter().find(|(_, col)| *col == attr.column) {
                return Err(ImportError::ConfigValidation(format!(
                    "attribute '{}' uses column {} already taken by '{fixed_name}'",
                    attr.name, attr.column
                )));
            }
            if let Some(other) = self.attributes[i + 1..].iter().find(|o| o.column == attr.column) {
                return Err(ImportError::ConfigValidation(format!(
                    "attributes '{}' and '{}' both use column {}",
                    attr.name, other.name, attr.column
                )));
            }
        }

        Ok(())
    }

    /// Distinct attribute names in first-mapped order.
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.attributes.len());
        for attr in &self.attributes {
            if !names.contains(&attr.name.as_str()) {
                names.push(&attr.name);
            }
        }
        names
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions { sheet: self.sheet, header_rows: self.header_rows }
    }

    /// Header titles for a blank import sheet, ordered by column.
    pub fn template_headers(&self) -> Vec<(usize, String)> {
        let mut headers: Vec<(usize, String)> = vec![
            (self.columns.code, "Reference".into()),
            (self.columns.barcode, "Barcode".into()),
            (self.columns.name, "Name".into()),
            (self.columns.description, "Sales description".into()),
        ];
        headers.extend(self.attributes.iter().map(|a| (a.column, a.name.clone())));
        headers.sort_by_key(|(col, _)| *col);
        headers
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
name = "Two attributes"

[columns]
code = 0
barcode = 1
name = 2
description = 8

[[attributes]]
column = 3
name = "Carga"

[[attributes]]
column = 4
name = "Velocidad"
"#;

    #[test]
    fn parse_small_profile() {
        let profile = ImportProfile::from_toml(SMALL).unwrap();
        assert_eq!(profile.name, "Two attributes");
        assert_eq!(profile.header_rows, 1);
        assert_eq!(profile.sheet, 0);
        assert_eq!(profile.columns.description, 8);
        assert_eq!(profile.attribute_names(), vec!["Carga", "Velocidad"]);
        assert_eq!(profile.product.detailed_type, ProductType::Product);
        assert_eq!(profile.product.invoice_policy, InvoicePolicy::Delivery);
    }

    #[test]
    fn parse_product_defaults() {
        let input = format!(
            r#"{SMALL}
[product]
detailed_type = "consu"
invoice_policy = "order"
"#
        );
        let profile = ImportProfile::from_toml(&input).unwrap();
        assert_eq!(profile.product.detailed_type, ProductType::Consumable);
        assert_eq!(profile.product.invoice_policy, InvoicePolicy::Order);
    }

    #[test]
    fn reject_unknown_product_type() {
        let input = format!(
            r#"{SMALL}
[product]
detailed_type = "storable"
"#
        );
        let err = ImportProfile::from_toml(&input).unwrap_err();
        assert!(matches!(err, ImportError::ConfigParse(_)));
    }

    #[test]
    fn default_profile_is_valid_and_round_trips() {
        let profile = ImportProfile::default();
        profile.validate().unwrap();
        assert_eq!(profile.attributes.len(), 13);
        assert_eq!(profile.attributes[0].column, 3);
        assert_eq!(profile.attributes[12].column, 15);
        assert_eq!(profile.attributes[12].name, "Segmento");

        let rendered = profile.to_toml().unwrap();
        assert_eq!(ImportProfile::from_toml(&rendered).unwrap(), profile);
    }

    #[test]
    fn reject_attribute_on_fixed_column() {
        let input = r#"
name = "Clash"
[[attributes]]
column = 2
name = "Marca"
"#;
        let err = ImportProfile::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("already taken by 'name'"), "{err}");
    }

    #[test]
    fn reject_two_attributes_on_one_column() {
        let input = r#"
name = "Clash"
[[attributes]]
column = 5
name = "Marca"
[[attributes]]
column = 5
name = "Peso"
"#;
        let err = ImportProfile::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("'Marca' and 'Peso'"), "{err}");
    }

    #[test]
    fn reject_shared_fixed_columns() {
        let input = r#"
name = "Clash"
[columns]
code = 0
barcode = 0
name = 2
description = 3
"#;
        let err = ImportProfile::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("'code' and 'barcode'"), "{err}");
    }

    #[test]
    fn reject_blank_attribute_name() {
        let input = r#"
name = "Blank"
[[attributes]]
column = 3
name = ""
"#;
        let err = ImportProfile::from_toml(input).unwrap_err();
        assert!(matches!(err, ImportError::ConfigValidation(_)));
    }

    #[test]
    fn same_attribute_on_two_columns_is_resolved_once() {
        let input = r#"
name = "Twice"
[[attributes]]
column = 3
name = "Marca"
[[attributes]]
column = 4
name = "Marca"
"#;
        let profile = ImportProfile::from_toml(input).unwrap();
        assert_eq!(profile.attribute_names(), vec!["Marca"]);
    }

    #[test]
    fn template_headers_are_column_ordered() {
        let profile = ImportProfile::from_toml(SMALL).unwrap();
        let headers = profile.template_headers();
        let cols: Vec<usize> = headers.iter().map(|(c, _)| *c).collect();
        assert_eq!(cols, vec![0, 1, 2, 3, 4, 8]);
        assert_eq!(headers[3].1, "Carga");
        assert_eq!(headers[5].1, "Sales description");
    }
}
