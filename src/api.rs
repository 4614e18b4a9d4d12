//! Questionnaire API Client
//!
//! HTTP bindings to the backend service. Every wrapper returns
//! `Result<T, String>`; callers log failures and leave their state unchanged.

use gloo_net::http::{Request, Response};
use web_sys::FormData;

use crate::config;
use crate::models::{PaginatedResponse, QuestionnaireDetail, QuestionnairePayload, Statistics};
use crate::pagination::SortKey;

fn questionnaire_url(path: &str) -> String {
    format!("{}/questionnaire{}", config::api_base(), path)
}

fn response_url(id: &str) -> String {
    format!("{}/responce/{}", config::api_base(), id)
}

fn check(response: Response) -> Result<Response, String> {
    if response.ok() {
        Ok(response)
    } else {
        Err(format!("HTTP {}", response.status()))
    }
}

// ========================
// Questionnaire CRUD
// ========================

pub async fn get_paginated(
    page: u32,
    limit: u32,
    sort_by: SortKey,
) -> Result<PaginatedResponse, String> {
    let url = format!(
        "{}?page={}&limit={}&sortBy={}",
        questionnaire_url(""),
        page,
        limit,
        sort_by.as_str()
    );
    let response = Request::get(&url).send().await.map_err(|e| e.to_string())?;
    check(response)?.json().await.map_err(|e| e.to_string())
}

pub async fn get_by_id(id: &str) -> Result<QuestionnaireDetail, String> {
    let url = questionnaire_url(&format!("/{}", id));
    let response = Request::get(&url).send().await.map_err(|e| e.to_string())?;
    check(response)?.json().await.map_err(|e| e.to_string())
}

pub async fn create(payload: &QuestionnairePayload) -> Result<(), String> {
    let response = Request::post(&questionnaire_url(""))
        .json(payload)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check(response).map(|_| ())
}

pub async fn update(id: &str, payload: &QuestionnairePayload) -> Result<(), String> {
    let url = questionnaire_url(&format!("/{}", id));
    let response = Request::put(&url)
        .json(payload)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check(response).map(|_| ())
}

pub async fn delete(id: &str) -> Result<(), String> {
    let url = questionnaire_url(&format!("/{}", id));
    let response = Request::delete(&url).send().await.map_err(|e| e.to_string())?;
    check(response).map(|_| ())
}

// ========================
// Responses & statistics
// ========================

pub async fn get_statistics(id: &str) -> Result<Statistics, String> {
    let url = questionnaire_url(&format!("/statistics/{}", id));
    let response = Request::get(&url).send().await.map_err(|e| e.to_string())?;
    check(response)?.json().await.map_err(|e| e.to_string())
}

/// Submit one attempt. `form` carries the serialized `answers` array, the
/// `timeTaken` field and one binary part per image answer.
pub async fn send_answers(id: &str, form: FormData) -> Result<(), String> {
    let response = Request::post(&response_url(id))
        .body(form)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check(response).map(|_| ())
}
