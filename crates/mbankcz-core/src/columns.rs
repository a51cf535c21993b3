//! Typed header lookup for the transaction table

use std::collections::HashMap;

use crate::error::{Error, Result};

pub const DATE: &str = "#Datum uskutečnění transakce";
pub const AMOUNT: &str = "#Částka transakce";
pub const PAYEE: &str = "#Plátce/Příjemce";
pub const VS: &str = "#VS";
pub const KS: &str = "#KS";
pub const SS: &str = "#SS";
pub const DESCRIPTION: &str = "#Popis transakce";
pub const MESSAGE: &str = "#Zpráva pro příjemce";
pub const COUNTER_ACCOUNT: &str = "#Číslo účtu plátce/příjemce";

/// Column positions resolved once from the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    pub date: usize,
    pub amount: usize,
    pub payee: usize,
    pub vs: usize,
    pub ks: usize,
    pub ss: usize,
    pub description: usize,
    pub message: usize,
    pub counter_account: Option<usize>,
}

/// Fields the base record is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub date: usize,
    pub memo: usize,
    pub payee: usize,
    pub amount: usize,
    pub check_no: usize,
}

impl ColumnIndex {
    /// Build the lookup from a header row, failing on the first absent column
    pub fn from_header(header: &[String]) -> Result<Self> {
        let positions: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim(), i))
            .collect();

        let require = |name: &'static str| {
            positions
                .get(name)
                .copied()
                .ok_or(Error::MissingColumn(name))
        };

        Ok(Self {
            date: require(DATE)?,
            amount: require(AMOUNT)?,
            payee: require(PAYEE)?,
            vs: require(VS)?,
            ks: require(KS)?,
            ss: require(SS)?,
            description: require(DESCRIPTION)?,
            message: require(MESSAGE)?,
            counter_account: positions.get(COUNTER_ACCOUNT).copied(),
        })
    }

    pub fn mapping(&self) -> FieldMapping {
        FieldMapping {
            date: self.date,
            memo: self.message,
            payee: self.payee,
            amount: self.amount,
            check_no: self.vs,
        }
    }
}
