// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Request schemas
//!
//! Turns raw JSON bodies, path segments and query strings into validated
//! drafts. Every failing field contributes one [`FieldIssue`]; a request is
//! rejected with all of them at once.
//!
//! Integer fields accept JSON numbers or numeric strings (`"64"`); fractional
//! values are rejected.

use chrono::{Datelike, NaiveDate};
use serde_json::{Map, Value};

use crate::domain::curriculum::CurriculumDraft;
use crate::domain::error::{CatalogError, FieldIssue};
use crate::domain::offering::OfferingDraft;
use crate::domain::period::{PeriodDraft, PeriodState};
use crate::domain::program::{ProgramDraft, ProgramId};
use crate::domain::subject::{SubjectDraft, SubjectId};
use crate::domain::period::PeriodId;

const MIN_YEAR: i32 = 2010;
const MAX_YEAR: i32 = 2100;

/// Collects issues while reading fields from one JSON object
struct FieldReader<'a> {
    body: &'a Map<String, Value>,
    issues: Vec<FieldIssue>,
}

impl<'a> FieldReader<'a> {
    fn new(body: &'a Value) -> Result<Self, CatalogError> {
        match body.as_object() {
            Some(body) => Ok(Self {
                body,
                issues: Vec::new(),
            }),
            None => Err(CatalogError::Validation(vec![FieldIssue::new(
                "body",
                "El cuerpo de la solicitud debe ser un objeto JSON",
            )])),
        }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.body.get(field).filter(|v| !v.is_null())
    }

    fn fail(&mut self, field: &str, message: String) {
        self.issues.push(FieldIssue::new(field, message));
    }

    fn int(&mut self, field: &str, label: &str, min: i64, max: Option<i64>) -> Option<i32> {
        let Some(raw) = self.present(field) else {
            self.fail(field, format!("{} debe ser un campo obligatorio", label));
            return None;
        };

        let number = match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        };
        let Some(number) = number else {
            self.fail(field, format!("{} debe enviarse como número o texto numérico", label));
            return None;
        };

        if number.fract() != 0.0 {
            self.fail(field, format!("{} debe ser un número entero", label));
            return None;
        }
        if number < min as f64 {
            self.fail(field, format!("{} debe ser mayor o igual a {}", label, min));
            return None;
        }
        let max = max.unwrap_or(i32::MAX as i64);
        if number > max as f64 {
            self.fail(field, format!("{} no puede ser mayor a {}", label, max));
            return None;
        }
        Some(number as i32)
    }

    fn string(&mut self, field: &str, label: &str, min: usize, max: usize) -> Option<String> {
        let Some(raw) = self.present(field) else {
            self.fail(field, format!("{} es obligatorio", label));
            return None;
        };
        let Some(text) = raw.as_str() else {
            self.fail(field, format!("{} debe ser texto", label));
            return None;
        };

        let len = text.chars().count();
        if len == 0 {
            self.fail(field, format!("{} es obligatorio", label));
            return None;
        }
        if len < min {
            self.fail(field, format!("{} debe tener al menos {} caracteres", label, min));
            return None;
        }
        if len > max {
            self.fail(field, format!("{} no puede superar los {} caracteres", label, max));
            return None;
        }
        Some(text.to_string())
    }

    /// Absent or null yields `Some(None)`; a bad value yields `None`
    fn optional_string(&mut self, field: &str, label: &str, max: usize) -> Option<Option<String>> {
        let Some(raw) = self.present(field) else {
            return Some(None);
        };
        let Some(text) = raw.as_str() else {
            self.fail(field, format!("{} debe ser texto", label));
            return None;
        };
        if text.chars().count() > max {
            self.fail(field, format!("{} no puede exceder los {} caracteres", label, max));
            return None;
        }
        Some(Some(text.to_string()))
    }

    /// Strict `YYYY-MM-DD`, a real calendar day, year within bounds
    fn date(&mut self, field: &str, noun: &str) -> Option<NaiveDate> {
        let text = self.present(field).and_then(Value::as_str).unwrap_or_default();
        if !has_date_shape(text) {
            self.fail(field, format!("El formato de {} es inválido. Debe ser AAAA-MM-DD", noun));
            return None;
        }
        let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") else {
            self.fail(field, format!("{} no es válida en el calendario", capitalize(noun)));
            return None;
        };
        if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            self.fail(
                field,
                format!("El año de {} debe estar entre {} y {}", noun, MIN_YEAR, MAX_YEAR),
            );
            return None;
        }
        Some(date)
    }

    fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, CatalogError> {
        if !self.issues.is_empty() {
            return Err(CatalogError::Validation(self.issues));
        }
        build().ok_or_else(|| CatalogError::internal("schema accepted an incomplete body"))
    }
}

fn has_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn parse_subject(body: &Value) -> Result<SubjectDraft, CatalogError> {
    let mut r = FieldReader::new(body)?;
    let name = r.string("nombreAsignatura", "El nombre de la asignatura", 3, 100);
    let load_hours = r.int("cargaHoraria", "La carga horaria", 1, Some(200));
    let format_id = r.int("idFormato", "El idFormato", 1, None);
    let info = r.optional_string("informacion", "La información", 200);

    r.finish(|| {
        Some(SubjectDraft {
            name: name?,
            load_hours: load_hours?,
            format_id: format_id?,
            info: info?,
        })
    })
}

pub fn parse_program(body: &Value) -> Result<ProgramDraft, CatalogError> {
    let mut r = FieldReader::new(body)?;
    let name = r.string("nombrePrograma", "El nombre del programa", 1, 100);
    let level_id = r.int("idNivel", "El idNivel", 1, None);
    let modality_id = r.int("idModalidad", "El idModalidad", 1, None);
    let duration_months = r.int("duracionMeses", "La duración en meses", 1, Some(240));

    r.finish(|| {
        Some(ProgramDraft {
            name: name?,
            level_id: level_id?,
            modality_id: modality_id?,
            duration_months: duration_months?,
        })
    })
}

pub fn parse_period(body: &Value) -> Result<PeriodDraft, CatalogError> {
    let mut r = FieldReader::new(body)?;
    let semester = r.string("semestre", "El semestre", 3, 10);
    let start_date = r.date("fechaInicio", "la fecha de inicio");
    let end_date = r.date("fechaFin", "la fecha de finalización");
    let state = r
        .int("idEstado", "El idEstado", 1, Some(PeriodState::Closed.id() as i64))
        .and_then(PeriodState::from_id);

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if start > end {
            r.fail("fechaFin", "La fecha de inicio no puede ser mayor que la fecha de fin".to_string());
        }
    }

    r.finish(|| {
        Some(PeriodDraft {
            semester: semester?,
            start_date: start_date?,
            end_date: end_date?,
            state: state?,
        })
    })
}

pub fn parse_curriculum(body: &Value) -> Result<CurriculumDraft, CatalogError> {
    let mut r = FieldReader::new(body)?;
    let program_id = r.int("idPrograma", "El idPrograma", 1, None);
    let subject_id = r.int("idAsignatura", "El idAsignatura", 1, None);
    let semester = r.int("semestre", "El semestre", 1, Some(12));
    let credits = r.int("creditos", "Los créditos", 1, Some(20));

    r.finish(|| {
        Some(CurriculumDraft {
            program_id: ProgramId(program_id?),
            subject_id: SubjectId(subject_id?),
            semester: semester?,
            credits: credits?,
        })
    })
}

pub fn parse_offering(body: &Value) -> Result<OfferingDraft, CatalogError> {
    let mut r = FieldReader::new(body)?;
    let program_id = r.int("idPrograma", "El idPrograma", 1, None);
    let period_id = r.int("idPeriodo", "El idPeriodo", 1, None);
    let subject_id = r.int("idAsignatura", "El idAsignatura", 1, None);
    let group = r.int("grupo", "El grupo", 1, Some(50));
    let capacity = r.int("cupo", "El cupo", 10, Some(200));

    r.finish(|| {
        Some(OfferingDraft {
            program_id: ProgramId(program_id?),
            period_id: PeriodId(period_id?),
            subject_id: SubjectId(subject_id?),
            group: group?,
            capacity: capacity?,
        })
    })
}

/// Path identifier: a positive 32-bit integer
pub fn parse_id(raw: &str, field: &str) -> Result<i32, CatalogError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CatalogError::Validation(vec![FieldIssue::new(
            field,
            format!("El {} debe ser un número entero positivo", field),
        )])),
    }
}

/// Optional `?limite=N` cap on list endpoints
pub fn parse_limit(raw: Option<&str>) -> Result<Option<i64>, CatalogError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };
    match raw.trim().parse::<i64>() {
        Ok(limit) if limit > 0 => Ok(Some(limit)),
        _ => Err(CatalogError::Validation(vec![FieldIssue::new(
            "limite",
            "El límite debe ser un número entero positivo",
        )])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issues(err: CatalogError) -> Vec<FieldIssue> {
        match err {
            CatalogError::Validation(issues) => issues,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    fn fields(err: CatalogError) -> Vec<String> {
        issues(err).into_iter().map(|i| i.field).collect()
    }

    #[test]
    fn test_subject_accepts_numeric_strings() {
        let draft = parse_subject(&json!({
            "nombreAsignatura": "Cálculo I",
            "cargaHoraria": "64",
            "idFormato": 2
        }))
        .unwrap();
        assert_eq!(draft.load_hours, 64);
        assert_eq!(draft.info, None);
    }

    #[test]
    fn test_subject_reports_every_bad_field() {
        let err = parse_subject(&json!({
            "nombreAsignatura": "Cá",
            "cargaHoraria": 201,
            "idFormato": "abc",
            "informacion": "x".repeat(201)
        }))
        .unwrap_err();
        assert_eq!(fields(err), vec!["nombreAsignatura", "cargaHoraria", "idFormato", "informacion"]);
    }

    #[test]
    fn test_fractional_numbers_are_rejected() {
        let err = parse_offering(&json!({
            "idPrograma": 1, "idPeriodo": 1, "idAsignatura": 1, "grupo": 1.5, "cupo": 30
        }))
        .unwrap_err();
        let issues = issues(err);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "El grupo debe ser un número entero");
    }

    #[test]
    fn test_offering_capacity_bounds() {
        let base = |cupo: i64| json!({"idPrograma": 1, "idPeriodo": 1, "idAsignatura": 1, "grupo": 1, "cupo": cupo});
        assert!(parse_offering(&base(10)).is_ok());
        assert!(parse_offering(&base(200)).is_ok());
        assert_eq!(fields(parse_offering(&base(9)).unwrap_err()), vec!["cupo"]);
        assert_eq!(fields(parse_offering(&base(201)).unwrap_err()), vec!["cupo"]);
    }

    #[test]
    fn test_period_parses_valid_body() {
        let draft = parse_period(&json!({
            "semestre": "2026-1",
            "fechaInicio": "2026-02-01",
            "fechaFin": "2026-06-30",
            "idEstado": 1
        }))
        .unwrap();
        assert_eq!(draft.state, PeriodState::Preparing);
        assert_eq!(draft.start_date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    }

    #[test]
    fn test_period_inverted_range_is_reported_on_end_date() {
        let err = parse_period(&json!({
            "semestre": "2026-1",
            "fechaInicio": "2026-06-30",
            "fechaFin": "2026-02-01",
            "idEstado": 1
        }))
        .unwrap_err();
        let issues = issues(err);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "fechaFin");
        assert!(issues[0].message.contains("no puede ser mayor"));
    }

    #[test]
    fn test_period_dates_must_be_strict_real_and_in_range() {
        let body = |start: &str| {
            json!({"semestre": "2026-1", "fechaInicio": start, "fechaFin": "2026-06-30", "idEstado": 2})
        };
        for bad in ["2026-2-01", "01/02/2026", "2026-02-30", "2009-12-31", ""] {
            let err = parse_period(&body(bad)).unwrap_err();
            assert_eq!(fields(err), vec!["fechaInicio"], "input {:?}", bad);
        }
    }

    #[test]
    fn test_period_rejects_unknown_state() {
        let err = parse_period(&json!({
            "semestre": "2026-1",
            "fechaInicio": "2026-02-01",
            "fechaFin": "2026-06-30",
            "idEstado": 4
        }))
        .unwrap_err();
        assert_eq!(fields(err), vec!["idEstado"]);
    }

    #[test]
    fn test_curriculum_semester_and_credit_bounds() {
        let err = parse_curriculum(&json!({
            "idPrograma": 1, "idAsignatura": 1, "semestre": 13, "creditos": 0
        }))
        .unwrap_err();
        assert_eq!(fields(err), vec!["semestre", "creditos"]);
    }

    #[test]
    fn test_missing_fields_are_required() {
        let err = parse_program(&json!({})).unwrap_err();
        assert_eq!(issues(err).len(), 4);
    }

    #[test]
    fn test_non_object_body() {
        assert_eq!(fields(parse_program(&json!([1, 2])).unwrap_err()), vec!["body"]);
    }

    #[test]
    fn test_path_ids_must_be_positive() {
        assert_eq!(parse_id("12", "idOferta").unwrap(), 12);
        assert!(parse_id("0", "idOferta").is_err());
        assert!(parse_id("-3", "idOferta").is_err());
        assert!(parse_id("abc", "idOferta").is_err());
    }

    #[test]
    fn test_limit_parsing() {
        assert_eq!(parse_limit(None).unwrap(), None);
        assert_eq!(parse_limit(Some("5")).unwrap(), Some(5));
        assert!(parse_limit(Some("0")).is_err());
        assert!(parse_limit(Some("diez")).is_err());
    }
}
