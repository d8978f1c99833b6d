// src/common/form.rs

use std::{borrow::Cow, fmt::Display, str::FromStr};

use axum::{
    extract::{rejection::FormRejection, FromRequest, Request},
    Form,
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{de, de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::common::error::{field_error, validation_error, AppError};

// ---
// Deserializadores para formulários HTML (application/x-www-form-urlencoded)
// ---
// O navegador manda "" para inputs vazios; tratamos como ausência de valor
// para que o `required` do validator gere a mensagem do campo.

pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

/// Igual ao anterior, mas sem `trim` (textos livres são guardados como vieram).
pub fn empty_text_as_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(de)?;
    Ok(opt.filter(|s| !s.trim().is_empty()))
}

/// Senhas: só o campo vazio conta como ausente; espaços são caracteres válidos.
pub fn empty_password_as_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(de)?;
    Ok(opt.filter(|s| !s.is_empty()))
}

/// `<input type="time">` manda "HH:MM" ou "HH:MM:SS".
pub fn optional_time<'de, D>(de: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_time(s).map(Some).map_err(de::Error::custom),
    }
}

pub fn parse_time(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S%.f"))
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
}

// ---
// Extrator de formulário campo a campo
// ---

/// Formulário recebido do navegador. Cada campo é convertido isoladamente:
/// um valor que não converte ("abc" num campo numérico) fica de fora do
/// modelo e vira uma mensagem no próprio campo, em vez de rejeitar o POST.
#[derive(Debug)]
pub struct Bound<T> {
    pub form: T,
    rejected: ValidationErrors,
}

impl<T> Bound<T>
where
    T: DeserializeOwned + Default,
{
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut rejected = ValidationErrors::new();
        let mut accepted = Map::new();

        for (key, value) in pairs {
            let single = Value::Object(Map::from_iter([(key.clone(), Value::String(value.clone()))]));
            if serde_json::from_value::<T>(single).is_ok() {
                accepted.insert(key, Value::String(value));
            } else {
                let message = format!("The value '{value}' is not valid for {key}.");
                rejected.errors_mut().insert(
                    Cow::Owned(key),
                    ValidationErrorsKind::Field(vec![field_error("parse", &message)]),
                );
            }
        }

        let form = serde_json::from_value(Value::Object(accepted)).unwrap_or_else(|e| {
            tracing::warn!("⚠️ Formulário descartado na conversão: {}", e);
            T::default()
        });
        Self { form, rejected }
    }
}

impl<T: Validate> Bound<T> {
    /// O formulário, se todos os campos converteram. Senão, os erros de conversão
    /// somados às regras declarativas dos campos que chegaram.
    pub fn converted(&self) -> Result<&T, AppError> {
        if self.rejected.is_empty() {
            return Ok(&self.form);
        }
        let mut errors = self.form.validate().err().unwrap_or_else(ValidationErrors::new);
        for (field, kind) in self.rejected.errors() {
            errors.errors_mut().insert(field.clone(), kind.clone());
        }
        Err(AppError::ValidationError(errors))
    }
}

impl<S, T> FromRequest<S> for Bound<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = FormRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
        Ok(Self::from_pairs(pairs))
    }
}

/// Extrai um campo obrigatório já validado.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, AppError> {
    value.ok_or_else(|| validation_error(field, "required", "This field is required."))
}

// ---
// Validações customizadas compartilhadas
// ---

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("The value cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}

/// Regra de "data no futuro" usada por Performance e Compliance.
pub fn is_future(date: NaiveDate, today: NaiveDate) -> bool {
    date > today
}
