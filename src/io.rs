use crate::model::{PersonId, Plan};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Import de personnes depuis CSV : header `name`, un nom par ligne.
pub fn import_people_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<PersonId>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid people row (empty name)");
        }
        out.push(PersonId::new(name));
    }
    Ok(out)
}

/// Parse une date `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date: {raw}"))
}

/// Parse une liste de jours fériés `YYYY-MM-DD` séparés par des virgules.
pub fn parse_holidays(raw: &str) -> anyhow::Result<BTreeSet<NaiveDate>> {
    raw.split(',')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(parse_date)
        .collect()
}

/// Fichier de jours fériés : une date par ligne, `#` introduit un commentaire.
pub fn import_holidays_file<P: AsRef<Path>>(path: P) -> anyhow::Result<BTreeSet<NaiveDate>> {
    let data = fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.as_ref().display()))?;
    data.lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .map(parse_date)
        .collect()
}

/// Export CSV du planning : header `date,person1,person2,special`.
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "person1", "person2", "special"])?;
    for (date, pair) in &plan.days {
        let special = if plan.is_special(*date) { "yes" } else { "no" };
        let date = date.format("%Y-%m-%d").to_string();
        w.write_record([date.as_str(), pair[0].as_str(), pair[1].as_str(), special])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des statistiques : header `person,total,special_days,dates`.
pub fn export_stats_csv<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["person", "total", "special_days", "dates"])?;
    for (person, s) in &plan.stats {
        let dates = s
            .dates
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect::<Vec<_>>()
            .join(";");
        let total = s.total.to_string();
        let special = s.special_days.to_string();
        w.write_record([person.as_str(), total.as_str(), special.as_str(), dates.as_str()])?;
    }
    w.flush()?;
    Ok(())
}
