use crate::commands::Context;
use anyhow::{Context as _, Result};
use phonedb_core::domain::PhoneRecord;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct SeedReport {
    pub inserted: usize,
    pub last: Option<PhoneRecord>,
}

pub fn seed(ctx: &Context<'_>) -> Result<SeedReport> {
    let phones = ctx.store.phones();
    let mut inserted = 0;
    let mut last_id = None;

    for number in &ctx.config.seed.numbers {
        let id = phones
            .insert(number)
            .with_context(|| format!("insert phone {:?}", number))?;
        debug!(%id, number = %number, "phone inserted");
        inserted += 1;
        last_id = Some(id);
    }

    let last = match last_id {
        Some(id) => {
            let number = phones
                .get(id)
                .with_context(|| format!("read back phone {}", id))?;
            Some(PhoneRecord { id, number })
        }
        None => None,
    };

    if !ctx.json {
        match &last {
            Some(record) => println!("Last inserted number is {}", record.number),
            None => println!("no numbers to seed"),
        }
    }

    Ok(SeedReport { inserted, last })
}
