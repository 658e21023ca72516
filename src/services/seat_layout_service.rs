//! Códec de distribución de asientos
//!
//! Conversión sin pérdida entre la matriz de celdas (`1` = asiento,
//! `0` = pasillo/vacío) y la cadena compacta `seatBitmask` + `cellsPerRow`,
//! más las ediciones estructurales del editor de esquemas.
//!
//! La máscara es la forma canónica persistida; la matriz es una vista de
//! edición transitoria reconstruida en cada carga.

use serde::{Deserialize, Serialize};

use crate::utils::errors::{DomainError, DomainResult};

pub const SEAT: u8 = 1;
pub const AISLE: u8 = 0;

/// Matriz fila-mayor de celdas
pub type SeatMatrix = Vec<Vec<u8>>;

/// Numeración de asientos: `Some(n)` para asientos, `None` para pasillos
pub type SeatNumbers = Vec<Vec<Option<u32>>>;

/// Forma persistida de una distribución
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatLayout {
    pub seat_bitmask: String,
    pub cells_per_row: usize,
}

impl SeatLayout {
    pub fn from_matrix(matrix: &[Vec<u8>]) -> DomainResult<Self> {
        matrix_to_bitmask(matrix)
    }

    /// Valida una máscara recibida del exterior
    pub fn parse(seat_bitmask: &str, cells_per_row: usize) -> DomainResult<Self> {
        check_bitmask(seat_bitmask, cells_per_row)?;
        Ok(Self {
            seat_bitmask: seat_bitmask.to_string(),
            cells_per_row,
        })
    }

    pub fn to_matrix(&self) -> DomainResult<SeatMatrix> {
        bitmask_to_matrix(&self.seat_bitmask, self.cells_per_row)
    }

    /// Número de asientos = cantidad de `1`
    pub fn number_seats(&self) -> u32 {
        self.seat_bitmask.chars().filter(|c| *c == '1').count() as u32
    }

    pub fn rows(&self) -> usize {
        if self.cells_per_row == 0 {
            0
        } else {
            self.seat_bitmask.len() / self.cells_per_row
        }
    }

    pub fn seat_numbers(&self) -> DomainResult<SeatNumbers> {
        Ok(compute_seat_numbers(&self.to_matrix()?))
    }

    /// Posición (fila, columna) del asiento `seat_number` en la numeración canónica
    pub fn seat_position(&self, seat_number: u32) -> Option<(usize, usize)> {
        if seat_number == 0 || self.cells_per_row == 0 {
            return None;
        }
        self.seat_bitmask
            .chars()
            .enumerate()
            .filter(|(_, c)| *c == '1')
            .nth(seat_number as usize - 1)
            .map(|(idx, _)| (idx / self.cells_per_row, idx % self.cells_per_row))
    }
}

fn column_count(matrix: &[Vec<u8>]) -> DomainResult<usize> {
    let first = matrix
        .first()
        .ok_or_else(|| DomainError::InvalidLayout("layout must have at least one row".to_string()))?;
    let width = first.len();
    if width == 0 {
        return Err(DomainError::InvalidLayout(
            "layout must have at least one column".to_string(),
        ));
    }
    if let Some(row) = matrix.iter().position(|r| r.len() != width) {
        return Err(DomainError::InvalidLayout(format!(
            "row {} has {} cells, expected {}",
            row,
            matrix[row].len(),
            width
        )));
    }
    Ok(width)
}

fn check_bitmask(bitmask: &str, cells_per_row: usize) -> DomainResult<()> {
    if cells_per_row == 0 {
        return Err(DomainError::InvalidLayout("cellsPerRow must be positive".to_string()));
    }
    if bitmask.is_empty() {
        return Err(DomainError::InvalidLayout("bitmask must not be empty".to_string()));
    }
    if let Some(c) = bitmask.chars().find(|c| *c != '0' && *c != '1') {
        return Err(DomainError::InvalidLayout(format!(
            "unexpected character '{}' in bitmask",
            c
        )));
    }
    if bitmask.len() % cells_per_row != 0 {
        return Err(DomainError::InvalidLayout(format!(
            "bitmask length {} is not a multiple of {}",
            bitmask.len(),
            cells_per_row
        )));
    }
    Ok(())
}

/// Aplana la matriz en orden fila-mayor
pub fn matrix_to_bitmask(matrix: &[Vec<u8>]) -> DomainResult<SeatLayout> {
    let cells_per_row = column_count(matrix)?;
    let mut bitmask = String::with_capacity(cells_per_row * matrix.len());
    for (r, row) in matrix.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match *cell {
                SEAT => bitmask.push('1'),
                AISLE => bitmask.push('0'),
                other => {
                    return Err(DomainError::InvalidLayout(format!(
                        "cell ({}, {}) has value {}, expected 0 or 1",
                        r, c, other
                    )))
                }
            }
        }
    }
    Ok(SeatLayout {
        seat_bitmask: bitmask,
        cells_per_row,
    })
}

pub fn bitmask_to_matrix(bitmask: &str, cells_per_row: usize) -> DomainResult<SeatMatrix> {
    check_bitmask(bitmask, cells_per_row)?;
    let cells: Vec<u8> = bitmask
        .bytes()
        .map(|b| if b == b'1' { SEAT } else { AISLE })
        .collect();
    Ok(cells.chunks(cells_per_row).map(|row| row.to_vec()).collect())
}

/// Numera los asientos desde 1 recorriendo fila por fila
pub fn compute_seat_numbers(matrix: &[Vec<u8>]) -> SeatNumbers {
    let mut next = 1u32;
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    if *cell == SEAT {
                        let number = next;
                        next += 1;
                        Some(number)
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect()
}

/// Inserta una fila completa de asientos en `at` (0..=filas)
pub fn insert_row(matrix: &[Vec<u8>], at: usize) -> DomainResult<SeatMatrix> {
    let width = column_count(matrix)?;
    if at > matrix.len() {
        return Err(DomainError::InvalidLayout(format!(
            "row index {} out of range 0..={}",
            at,
            matrix.len()
        )));
    }
    let mut result = matrix.to_vec();
    result.insert(at, vec![SEAT; width]);
    Ok(result)
}

/// Elimina la fila `at`; no hace nada si sólo queda una fila
pub fn delete_row(matrix: &[Vec<u8>], at: usize) -> DomainResult<SeatMatrix> {
    column_count(matrix)?;
    if matrix.len() == 1 {
        return Ok(matrix.to_vec());
    }
    if at >= matrix.len() {
        return Err(DomainError::InvalidLayout(format!(
            "row index {} out of range 0..{}",
            at,
            matrix.len()
        )));
    }
    let mut result = matrix.to_vec();
    result.remove(at);
    Ok(result)
}

/// Inserta una columna de asientos en `at` (0..=columnas) en todas las filas
pub fn insert_column(matrix: &[Vec<u8>], at: usize) -> DomainResult<SeatMatrix> {
    let width = column_count(matrix)?;
    if at > width {
        return Err(DomainError::InvalidLayout(format!(
            "column index {} out of range 0..={}",
            at, width
        )));
    }
    Ok(matrix
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.insert(at, SEAT);
            row
        })
        .collect())
}

/// Elimina la columna `at`; no hace nada si sólo queda una columna
pub fn delete_column(matrix: &[Vec<u8>], at: usize) -> DomainResult<SeatMatrix> {
    let width = column_count(matrix)?;
    if width == 1 {
        return Ok(matrix.to_vec());
    }
    if at >= width {
        return Err(DomainError::InvalidLayout(format!(
            "column index {} out of range 0..{}",
            at, width
        )));
    }
    Ok(matrix
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.remove(at);
            row
        })
        .collect())
}

/// Intercambia filas y columnas ("rotar esquema")
pub fn transpose(matrix: &[Vec<u8>]) -> DomainResult<SeatMatrix> {
    let width = column_count(matrix)?;
    Ok((0..width)
        .map(|c| matrix.iter().map(|row| row[c]).collect())
        .collect())
}

/// Alterna asiento/pasillo en una celda
pub fn toggle_cell(matrix: &[Vec<u8>], row: usize, column: usize) -> DomainResult<SeatMatrix> {
    let width = column_count(matrix)?;
    if row >= matrix.len() || column >= width {
        return Err(DomainError::InvalidLayout(format!(
            "cell ({}, {}) outside {}x{} layout",
            row,
            column,
            matrix.len(),
            width
        )));
    }
    let mut result = matrix.to_vec();
    result[row][column] = if result[row][column] == SEAT { AISLE } else { SEAT };
    Ok(result)
}

/// Operaciones del editor de esquemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum LayoutEdit {
    InsertRow { at: usize },
    DeleteRow { at: usize },
    InsertColumn { at: usize },
    DeleteColumn { at: usize },
    Transpose,
    ToggleCell { row: usize, column: usize },
}

/// Reductor `(matriz actual, edición) -> nueva matriz`.
/// Si la edición es inválida la matriz de entrada no cambia.
pub fn apply_edit(matrix: &[Vec<u8>], edit: LayoutEdit) -> DomainResult<SeatMatrix> {
    match edit {
        LayoutEdit::InsertRow { at } => insert_row(matrix, at),
        LayoutEdit::DeleteRow { at } => delete_row(matrix, at),
        LayoutEdit::InsertColumn { at } => insert_column(matrix, at),
        LayoutEdit::DeleteColumn { at } => delete_column(matrix, at),
        LayoutEdit::Transpose => transpose(matrix),
        LayoutEdit::ToggleCell { row, column } => toggle_cell(matrix, row, column),
    }
}

/// Esquema de autocar de 15x6: fila 0 sólo con la puerta delantera,
/// banqueta trasera completa y pasillo en la columna 3.
pub fn coach_15x6() -> SeatMatrix {
    (0..15)
        .map(|row| match row {
            0 => vec![0, 0, 0, 0, 1, 1],
            14 => vec![1, 1, 1, 1, 1, 1],
            _ => vec![1, 1, 1, 0, 1, 1],
        })
        .collect()
}
