use anyhow::bail;
use contracts::domain::a001_commerce::CommerceId;
use contracts::domain::a002_product::Product;
use contracts::usecases::u501_import_products::{ImportPolicy, ParsedRecord};
use uuid::Uuid;

/// Everything a committed import will write, computed up front.
/// Planning is pure: it reads the existing record set and the parsed rows
/// and produces inserts/updates/deletes without touching any store.
#[derive(Debug, Default)]
pub struct ReconcilePlan {
    pub inserts: Vec<Product>,
    pub updates: Vec<Product>,
    pub deletes: Vec<Uuid>,
    /// Rows whose match was ambiguous (several existing records qualified);
    /// the first record in repository order was chosen
    pub ambiguous_matches: usize,
    pub warnings: Vec<String>,
}

/// Compute the write plan for an import.
///
/// Fails without producing a plan when any parsed row lacks a name: the
/// whole import is rejected before anything commits.
pub fn plan(
    commerce_id: CommerceId,
    existing: &[Product],
    records: &[ParsedRecord],
    policy: ImportPolicy,
) -> anyhow::Result<ReconcilePlan> {
    ensure_names(records)?;

    let mut plan = ReconcilePlan::default();

    match policy {
        ImportPolicy::Add => {
            for record in records {
                plan.inserts.push(new_product(commerce_id, record));
            }
        }
        ImportPolicy::Update => {
            // Updated copies live here so two rows matching the same record
            // compose instead of clobbering each other (last row wins per field)
            let mut working: Vec<Product> = existing.to_vec();
            let mut touched: Vec<Uuid> = Vec::new();

            for record in records {
                let candidates: Vec<usize> = working
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| matches_record(p, record))
                    .map(|(i, _)| i)
                    .collect();

                match candidates.first() {
                    Some(&index) => {
                        if candidates.len() > 1 {
                            plan.ambiguous_matches += 1;
                            plan.warnings.push(format!(
                                "\"{}\" coincide con {} registros existentes; se actualizó el primero",
                                record.name,
                                candidates.len()
                            ));
                        }
                        apply_record(&mut working[index], record);
                        let id = working[index].base.id.value();
                        if !touched.contains(&id) {
                            touched.push(id);
                        }
                    }
                    None => plan.inserts.push(new_product(commerce_id, record)),
                }
            }

            plan.updates = working
                .into_iter()
                .filter(|p| touched.contains(&p.base.id.value()))
                .collect();
        }
        ImportPolicy::Replace => {
            plan.deletes = existing.iter().map(|p| p.base.id.value()).collect();
            for record in records {
                plan.inserts.push(new_product(commerce_id, record));
            }
        }
    }

    Ok(plan)
}

/// Every row must carry a name, otherwise nothing may commit
fn ensure_names(records: &[ParsedRecord]) -> anyhow::Result<()> {
    let nameless = records.iter().filter(|r| r.name.trim().is_empty()).count();
    if nameless > 0 {
        bail!(
            "{} fila(s) no tienen nombre; la importación fue rechazada completa",
            nameless
        );
    }
    Ok(())
}

/// Match rule: equal code when both sides have one, or equal name
fn matches_record(product: &Product, record: &ParsedRecord) -> bool {
    if let Some(code) = record.code.as_deref() {
        if !product.base.code.is_empty() && product.base.code == code {
            return true;
        }
    }
    product.base.description == record.name
}

fn new_product(commerce_id: CommerceId, record: &ParsedRecord) -> Product {
    let mut product = Product::new_for_insert(
        commerce_id,
        record.code.clone().unwrap_or_default(),
        record.name.clone(),
    );
    apply_record(&mut product, record);
    product
}

/// Overwrite the fields the mapping provided; unmapped fields keep their
/// current value
fn apply_record(product: &mut Product, record: &ParsedRecord) {
    product.base.description = record.name.clone();
    if let Some(code) = &record.code {
        product.base.code = code.clone();
    }
    if let Some(category) = &record.category {
        product.category = category.clone();
    }
    if let Some(price) = record.price {
        product.price = price;
    }
    if let Some(stock) = record.stock {
        product.stock = Some(stock);
    }
    if let Some(description) = &record.description {
        product.detail = description.clone();
    }
    product.before_write();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commerce() -> CommerceId {
        CommerceId::new_v4()
    }

    fn product(commerce_id: CommerceId, name: &str, code: &str, price: f64) -> Product {
        let mut p = Product::new_for_insert(commerce_id, code.to_string(), name.to_string());
        p.price = price;
        p
    }

    fn record(name: &str) -> ParsedRecord {
        ParsedRecord::named(name)
    }

    #[test]
    fn add_inserts_every_row() {
        let cid = commerce();
        let existing = vec![product(cid, "Café", "P-1", 800.0)];
        let records = vec![record("Café"), record("Té")];

        let plan = plan(cid, &existing, &records, ImportPolicy::Add).unwrap();
        assert_eq!(plan.inserts.len(), 2);
        assert!(plan.updates.is_empty());
        assert!(plan.deletes.is_empty());
    }

    #[test]
    fn replace_yields_exactly_m_records() {
        let cid = commerce();
        let existing = vec![
            product(cid, "Café", "P-1", 800.0),
            product(cid, "Té", "P-2", 600.0),
            product(cid, "Mate", "P-3", 500.0),
        ];
        let records = vec![record("Tostado"), record("Medialuna")];

        let plan = plan(cid, &existing, &records, ImportPolicy::Replace).unwrap();
        // N existing deleted, M rows inserted → exactly M remain
        assert_eq!(plan.deletes.len(), 3);
        assert_eq!(plan.inserts.len(), 2);
        assert!(plan.updates.is_empty());
    }

    #[test]
    fn update_matches_by_code_and_overwrites_in_place() {
        let cid = commerce();
        let existing = vec![product(cid, "Café chico", "P-1", 800.0)];

        let mut rec = record("Café en jarrito");
        rec.code = Some("P-1".to_string());
        rec.price = Some(950.0);

        let plan = plan(cid, &existing, &[rec], ImportPolicy::Update).unwrap();
        assert!(plan.inserts.is_empty(), "matched row must not duplicate");
        assert_eq!(plan.updates.len(), 1);
        assert_eq!(plan.updates[0].base.id, existing[0].base.id);
        assert_eq!(plan.updates[0].base.description, "Café en jarrito");
        assert_eq!(plan.updates[0].price, 950.0);
    }

    #[test]
    fn update_falls_back_to_name_match() {
        let cid = commerce();
        let existing = vec![product(cid, "Café", "", 800.0)];

        let mut rec = record("Café");
        rec.price = Some(900.0);

        let plan = plan(cid, &existing, &[rec], ImportPolicy::Update).unwrap();
        assert_eq!(plan.updates.len(), 1);
        assert_eq!(plan.updates[0].price, 900.0);
    }

    #[test]
    fn update_inserts_unmatched_rows() {
        let cid = commerce();
        let existing = vec![product(cid, "Café", "P-1", 800.0)];

        let plan = plan(cid, &existing, &[record("Licuado")], ImportPolicy::Update).unwrap();
        assert_eq!(plan.inserts.len(), 1);
        assert!(plan.updates.is_empty());
    }

    #[test]
    fn ambiguous_name_match_takes_first_and_warns() {
        let cid = commerce();
        let existing = vec![
            product(cid, "Café", "P-1", 800.0),
            product(cid, "Café", "P-2", 850.0),
        ];

        let mut rec = record("Café");
        rec.price = Some(1000.0);

        let plan = plan(cid, &existing, &[rec], ImportPolicy::Update).unwrap();
        assert_eq!(plan.ambiguous_matches, 1);
        assert_eq!(plan.warnings.len(), 1);
        assert_eq!(plan.updates.len(), 1);
        assert_eq!(plan.updates[0].base.id, existing[0].base.id);
    }

    #[test]
    fn nameless_row_rejects_whole_import() {
        let cid = commerce();
        let records = vec![record("Café"), record("")];

        let result = plan(cid, &[], &records, ImportPolicy::Add);
        assert!(result.is_err());
    }

    #[test]
    fn unmapped_fields_keep_existing_values_on_update() {
        let cid = commerce();
        let mut existing_product = product(cid, "Café", "P-1", 800.0);
        existing_product.category = "bebidas".to_string();

        let mut rec = record("Café");
        rec.code = Some("P-1".to_string());
        // no category/price/stock in the file

        let plan = plan(cid, &[existing_product], &[rec], ImportPolicy::Update).unwrap();
        assert_eq!(plan.updates[0].category, "bebidas");
        assert_eq!(plan.updates[0].price, 800.0);
    }
}
