use contracts::usecases::common::{UseCaseError, UseCaseResult};
use contracts::usecases::u501_import_products::{
    ColumnMapping, ImportPreview, ImportReport, ImportRequest, PreviewRequest,
};
use uuid::Uuid;

use super::{mapper, reconciler, tokenizer};
use crate::domain::a001_commerce;
use crate::domain::a002_product::repository::{self as product_repository, WriteOp};
use crate::shared::data::batch::BatchAccumulator;
use crate::shared::logger;

/// How many parsed rows the preview echoes back
const PREVIEW_SAMPLE_ROWS: usize = 5;

/// Dry run: tokenize and auto-map without writing anything.
/// The dashboard uses this to render the mapping confirmation dialog.
pub async fn preview(
    commerce_id: Uuid,
    owner_user_id: &str,
    request: PreviewRequest,
) -> UseCaseResult<ImportPreview> {
    a001_commerce::service::get_owned(commerce_id, owner_user_id)
        .await
        .map_err(UseCaseError::from)?
        .ok_or_else(|| UseCaseError::not_found("Comercio no encontrado"))?;

    let table =
        tokenizer::tokenize_csv(&request.csv_text).map_err(|e| UseCaseError::validation(e.to_string()))?;

    let mapping = mapper::auto_map(&table.headers);
    let ignored = mapper::ignored_headers(&table.headers, &mapping);
    let records = mapper::parse_rows(&table.rows, &mapping);

    Ok(ImportPreview {
        importable: mapping.is_importable(),
        ignored_headers: ignored,
        row_count: records.len(),
        sample: records.into_iter().take(PREVIEW_SAMPLE_ROWS).collect(),
        headers: table.headers,
        mapping,
    })
}

/// Run a full import: tokenize, map, plan and commit in batches.
pub async fn run_import(
    commerce_id: Uuid,
    owner_user_id: &str,
    request: ImportRequest,
) -> UseCaseResult<ImportReport> {
    let commerce = a001_commerce::service::get_owned(commerce_id, owner_user_id)
        .await
        .map_err(UseCaseError::from)?
        .ok_or_else(|| UseCaseError::not_found("Comercio no encontrado"))?;

    // 1. Tokenize
    let table =
        tokenizer::tokenize_csv(&request.csv_text).map_err(|e| UseCaseError::validation(e.to_string()))?;

    // 2. Resolve the column mapping (explicit from the dialog, or heuristic)
    let mapping: ColumnMapping = match request.mapping {
        Some(m) => m,
        None => mapper::auto_map(&table.headers),
    };
    mapper::validate_mapping(&mapping).map_err(|e| UseCaseError::validation(e.to_string()))?;

    // 3. Parse rows and plan against the current record set
    let records = mapper::parse_rows(&table.rows, &mapping);
    let existing = product_repository::list_by_commerce(commerce_id)
        .await
        .map_err(UseCaseError::from)?;

    let plan = reconciler::plan(commerce.base.id, &existing, &records, request.policy)
        .map_err(|e| UseCaseError::validation(e.to_string()))?;

    let report = ImportReport {
        policy: request.policy,
        total_rows: records.len(),
        inserted: plan.inserts.len(),
        updated: plan.updates.len(),
        deleted: plan.deletes.len(),
        ambiguous_matches: plan.ambiguous_matches,
        warnings: plan.warnings.clone(),
    };

    // 4. Commit: deletes first (replace semantics), then updates, then inserts.
    //    Each chunk is atomic; a failed chunk aborts everything still pending.
    let total_ops = plan.deletes.len() + plan.updates.len() + plan.inserts.len();
    let mut accumulator = BatchAccumulator::new();
    let mut committed = 0usize;

    let ops = plan
        .deletes
        .into_iter()
        .map(WriteOp::Delete)
        .chain(plan.updates.into_iter().map(WriteOp::Update))
        .chain(plan.inserts.into_iter().map(WriteOp::Insert));

    for op in ops {
        if let Some(chunk) = accumulator.push(op) {
            committed += commit_chunk(chunk, committed, total_ops).await?;
        }
    }
    let rest = accumulator.finish();
    if !rest.is_empty() {
        committed += commit_chunk(rest, committed, total_ops).await?;
    }

    logger::log(
        "import",
        &format!(
            "Importación en {}: {} filas, {} altas, {} actualizaciones, {} bajas",
            commerce.base.description,
            report.total_rows,
            report.inserted,
            report.updated,
            report.deleted
        ),
    );

    Ok(report)
}

/// Commit one chunk; on failure report how far the import got, since the
/// chunks already committed stay committed
async fn commit_chunk(
    chunk: Vec<WriteOp>,
    committed_so_far: usize,
    total_ops: usize,
) -> UseCaseResult<usize> {
    match product_repository::apply_batch(chunk).await {
        Ok(applied) => Ok(applied),
        Err(e) => Err(UseCaseError::new(
            "RECONCILE_ERROR",
            format!(
                "La importación se interrumpió: {} de {} operaciones confirmadas, el resto fue descartado",
                committed_so_far, total_ops
            ),
        )
        .with_details(e.to_string())),
    }
}
