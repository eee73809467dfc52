use std::collections::{HashMap, VecDeque};

use crate::cell::{ArcCell, BagOfCells, RawBagOfCells, RawCell, TonCellError};
use crate::TonHash;

/// Flattens the cell graph reachable from the roots into a topologically sorted list.
///
/// Cells are first numbered breadth-first, identical subtrees (same hash) are emitted once.
/// Any cell that ends up before one of its parents is moved to the end until every reference
/// points forward.
pub(crate) fn convert_to_raw_boc(boc: &BagOfCells) -> Result<RawBagOfCells, TonCellError> {
    let (cells, mut indices) = index_cells(&boc.roots);
    let mut next_index = cells.len();

    let mut reordered = true;
    while reordered {
        reordered = false;
        let mut by_index: Vec<&ArcCell> = cells.iter().collect();
        by_index.sort_by_key(|cell| indices[&cell.cell_hash()]);
        for cell in by_index {
            let cell_index = indices[&cell.cell_hash()];
            for reference in cell.references.iter() {
                let ref_index = indices
                    .get_mut(&reference.cell_hash())
                    .ok_or_else(|| missing_cell_error(&reference.cell_hash(), "references"))?;
                if *ref_index < cell_index {
                    *ref_index = next_index;
                    next_index += 1;
                    reordered = true;
                }
            }
        }
    }

    // Remove gaps in indices.
    let mut ordered = cells;
    ordered.sort_by_key(|cell| indices[&cell.cell_hash()]);
    for (real_index, cell) in ordered.iter().enumerate() {
        indices.insert(cell.cell_hash(), real_index);
    }

    let raw_cells = ordered
        .iter()
        .map(|cell| raw_cell_from_cell(cell, &indices))
        .collect::<Result<Vec<_>, _>>()?;
    let roots = boc
        .roots
        .iter()
        .map(|root| {
            indices
                .get(&root.cell_hash())
                .copied()
                .ok_or_else(|| missing_cell_error(&root.cell_hash(), "roots"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawBagOfCells {
        cells: raw_cells,
        roots,
    })
}

fn index_cells(roots: &[ArcCell]) -> (Vec<ArcCell>, HashMap<TonHash, usize>) {
    let mut cells = vec![];
    let mut indices = HashMap::new();
    let mut queue: VecDeque<ArcCell> = roots.iter().cloned().collect();

    while let Some(cell) = queue.pop_front() {
        let hash = cell.cell_hash();
        if indices.contains_key(&hash) {
            continue;
        }
        indices.insert(hash, cells.len());
        queue.extend(cell.references.iter().cloned());
        cells.push(cell);
    }
    (cells, indices)
}

fn raw_cell_from_cell(
    cell: &ArcCell,
    indices: &HashMap<TonHash, usize>,
) -> Result<RawCell, TonCellError> {
    let references = cell
        .references
        .iter()
        .map(|reference| {
            indices
                .get(&reference.cell_hash())
                .copied()
                .ok_or_else(|| missing_cell_error(&reference.cell_hash(), "references"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RawCell {
        data: cell.data.clone(),
        bit_len: cell.bit_len,
        references,
    })
}

fn missing_cell_error(hash: &TonHash, searching: &str) -> TonCellError {
    TonCellError::boc_serialization_error(format!(
        "Couldn't find cell with hash {} while searching for {}",
        hex::encode(hash),
        searching
    ))
}
