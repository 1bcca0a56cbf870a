use anyhow::bail;
use contracts::usecases::u501_import_products::{
    ColumnBinding, ColumnMapping, ParsedRecord, TargetField,
};

/// Heuristic auto-mapping: each header is assigned to the first target field
/// whose keyword list matches it (case-insensitive substring). A field already
/// fed by an earlier header is not reassigned; headers that match nothing are
/// ignored.
pub fn auto_map(headers: &[String]) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();

    for (index, header) in headers.iter().enumerate() {
        let normalized = header.trim().to_lowercase();
        if normalized.is_empty() {
            continue;
        }

        let matched = TargetField::ALL
            .iter()
            .find(|field| field.keywords().iter().any(|kw| normalized.contains(kw)));

        if let Some(&field) = matched {
            if mapping.column_for(field).is_none() {
                mapping.bindings.push(ColumnBinding { field, column: index });
            }
        }
    }

    mapping
}

/// Headers no binding consumes (shown in the preview as "se ignora")
pub fn ignored_headers(headers: &[String], mapping: &ColumnMapping) -> Vec<String> {
    headers
        .iter()
        .enumerate()
        .filter(|(i, _)| !mapping.bindings.iter().any(|b| b.column == *i))
        .map(|(_, h)| h.clone())
        .collect()
}

/// The import stays disabled until some column feeds the name field
pub fn validate_mapping(mapping: &ColumnMapping) -> anyhow::Result<()> {
    if !mapping.is_importable() {
        bail!("Ninguna columna está asignada al campo nombre; la importación está deshabilitada");
    }
    Ok(())
}

/// Parse data rows under a mapping. Rows whose mapped cells are all empty
/// are dropped (trailing blank rows from spreadsheet exports).
pub fn parse_rows(rows: &[Vec<String>], mapping: &ColumnMapping) -> Vec<ParsedRecord> {
    rows.iter()
        .map(|row| parse_row(row, mapping))
        .filter(|rec| !is_empty_record(rec))
        .collect()
}

fn parse_row(row: &[String], mapping: &ColumnMapping) -> ParsedRecord {
    let cell = |field: TargetField| -> Option<&str> {
        mapping
            .column_for(field)
            .and_then(|i| row.get(i))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    };

    ParsedRecord {
        name: cell(TargetField::Name).unwrap_or_default().to_string(),
        code: cell(TargetField::Code).map(str::to_string),
        category: cell(TargetField::Category).map(str::to_string),
        price: cell(TargetField::Price).and_then(parse_price),
        stock: cell(TargetField::Stock).and_then(parse_stock),
        description: cell(TargetField::Description).map(str::to_string),
    }
}

fn is_empty_record(rec: &ParsedRecord) -> bool {
    rec.name.is_empty()
        && rec.code.is_none()
        && rec.category.is_none()
        && rec.price.is_none()
        && rec.stock.is_none()
        && rec.description.is_none()
}

/// Parse a price cell. Currency symbols and thousand separators are
/// tolerated; a single comma with no dot is read as the decimal separator
/// ("1.234,56" and "1234.56" both parse). Unparseable values become None.
fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') && !cleaned.contains('.') {
        // "1234,56" → comma is the decimal separator
        cleaned.replacen(',', ".", 1)
    } else if cleaned.contains(',') && cleaned.contains('.') {
        // "1.234,56" → dots are thousand separators
        cleaned.replace('.', "").replacen(',', ".", 1)
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok().filter(|p| p.is_finite())
}

fn parse_stock(raw: &str) -> Option<i64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    digits.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn maps_spanish_headers() {
        let mapping = auto_map(&headers(&["Nombre del producto", "Precio", "Stock", "SKU"]));
        assert_eq!(mapping.column_for(TargetField::Name), Some(0));
        assert_eq!(mapping.column_for(TargetField::Price), Some(1));
        assert_eq!(mapping.column_for(TargetField::Stock), Some(2));
        assert_eq!(mapping.column_for(TargetField::Code), Some(3));
    }

    #[test]
    fn unmatched_headers_are_ignored() {
        let mapping = auto_map(&headers(&["Nombre", "Proveedor", "Precio"]));
        assert_eq!(mapping.bindings.len(), 2);
        let ignored = ignored_headers(&headers(&["Nombre", "Proveedor", "Precio"]), &mapping);
        assert_eq!(ignored, vec!["Proveedor"]);
    }

    #[test]
    fn first_header_wins_a_contested_field() {
        // both headers match the name keywords; the first keeps the binding
        let mapping = auto_map(&headers(&["Nombre", "Producto"]));
        assert_eq!(mapping.column_for(TargetField::Name), Some(0));
        assert_eq!(mapping.bindings.len(), 1);
    }

    #[test]
    fn mapping_without_name_is_rejected() {
        let mapping = auto_map(&headers(&["Precio", "Stock"]));
        assert!(!mapping.is_importable());
        assert!(validate_mapping(&mapping).is_err());
    }

    #[test]
    fn parses_typed_cells() {
        let mapping = auto_map(&headers(&["nombre", "precio", "stock"]));
        let rows = vec![vec![
            "Empanada".to_string(),
            "$ 1.250,50".to_string(),
            "12 u".to_string(),
        ]];
        let records = parse_rows(&rows, &mapping);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Empanada");
        assert_eq!(records[0].price, Some(1250.50));
        assert_eq!(records[0].stock, Some(12));
    }

    #[test]
    fn unparseable_price_becomes_none() {
        let mapping = auto_map(&headers(&["nombre", "precio"]));
        let rows = vec![vec!["Café".to_string(), "consultar".to_string()]];
        let records = parse_rows(&rows, &mapping);
        assert_eq!(records[0].price, None);
    }

    #[test]
    fn fully_empty_rows_are_dropped() {
        let mapping = auto_map(&headers(&["nombre", "precio"]));
        let rows = vec![
            vec!["Café".to_string(), "800".to_string()],
            vec!["".to_string(), "".to_string()],
        ];
        let records = parse_rows(&rows, &mapping);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn plain_decimal_price_parses() {
        assert_eq!(parse_price("1234.56"), Some(1234.56));
        assert_eq!(parse_price("1234,56"), Some(1234.56));
        assert_eq!(parse_price("800"), Some(800.0));
    }
}
