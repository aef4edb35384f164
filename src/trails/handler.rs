#![forbid(unsafe_code)]

use std::sync::Arc;

use log::{debug, error, info};
use poem::http::{Method, StatusCode};
use poem::web::{Data, Html};
use poem::{handler, Body, IntoResponse, Request, Response};
use tera::Context;

use crate::trails::filter::{filter_trails, TrailFilter};
use crate::trails::loader::load_trails;
use crate::trails::model::Trail;
use crate::utils::config::{RuntimeCtx, TRAILS_TEMPLATE};
use crate::utils::errors::Errors;
use crate::utils::trails_utils::{self, RequestDebug};

// Value a checkbox submits when ticked.
const CHECKED: &str = "on";

// Only bodies of this type carry form fields.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// Opaque messages returned to clients; details only go to the log.
const FORM_ERROR_MSG: &str = "Error reading trails form";
const LOAD_ERROR_MSG: &str = "Error loading trails data";
const RENDER_ERROR_MSG: &str = "Error rendering trails page";

// ***************************************************************************
//                          Request Definitions
// ***************************************************************************
/// Submitted form fields in lookup order: urlencoded body pairs first, then
/// query string pairs.  Repeated keys are kept; the first one wins.
#[derive(Debug, Default)]
pub struct FormValues(Vec<(String, String)>);

impl FormValues {
    /// Collect the fields of a request whose urlencoded body, if any, has
    /// already been read.
    pub fn parse(query: Option<&str>, body: Option<&[u8]>) -> Result<Self, Errors> {
        let mut pairs: Vec<(String, String)> = match body {
            Some(b) => serde_urlencoded::from_bytes(b)
                .map_err(|e| Errors::FormDecode(e.to_string()))?,
            None => vec![],
        };
        if let Some(q) = query {
            let query_pairs: Vec<(String, String)> = serde_urlencoded::from_str(q)
                .map_err(|e| Errors::FormDecode(e.to_string()))?;
            pairs.extend(query_pairs);
        }
        Ok(FormValues(pairs))
    }

    /// First value submitted for key, or the empty string.
    pub fn value(&self, key: &str) -> &str {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }

    fn checked(&self, key: &str) -> bool {
        self.value(key) == CHECKED
    }
}

impl From<&FormValues> for TrailFilter {
    fn from(form: &FormValues) -> Self {
        TrailFilter {
            address: form.value("address").to_string(),
            difficulty: form.value("difficulty").to_string(),
            restrooms: form.checked("restrooms"),
            picnic: form.checked("picnic"),
            fishing: form.checked("fishing"),
            fee: form.checked("fee"),
            bike_rack: form.checked("bikerack"),
        }
    }
}

// Implement the debug record trait for logging.
impl RequestDebug for TrailFilter {
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Trail criteria:");
        s.push_str("\n    address: ");
        s.push_str(&self.address);
        s.push_str("\n    difficulty: ");
        s.push_str(&self.difficulty);
        s.push_str(&format!(
            "\n    restrooms: {}, picnic: {}, fishing: {}, fee: {}, bike_rack: {}",
            self.restrooms, self.picnic, self.fishing, self.fee, self.bike_rack
        ));
        s
    }
}

// ***************************************************************************
//                                Endpoint
// ***************************************************************************
// ---------------------------------------------------------------------------
// trails_handler:
// ---------------------------------------------------------------------------
/** Load the dataset, keep the trails matching the submitted criteria and
 * render them.  Criteria come from the query string and, for POST, from a
 * urlencoded body whose values take precedence.  A form that cannot be read
 * is a client error, never an empty set of criteria.
 */
#[handler]
pub async fn trails_handler(
    http_req: &Request,
    body: Body,
    ctx: Data<&Arc<RuntimeCtx>>,
) -> Response {
    let filter: TrailFilter = match read_form(http_req, body).await {
        Ok(form) => (&form).into(),
        Err(e) => {
            error!("ERROR: {}", e);
            return (StatusCode::BAD_REQUEST, FORM_ERROR_MSG).into_response();
        }
    };
    trails_utils::debug_request(http_req, &filter);
    if filter.is_empty() {
        debug!("No trail criteria supplied; every record matches.");
    }

    // -------------------- Load -------------------------------
    let config = &ctx.parms.config;
    let trails = match load_trails(&config.data_file, &config.columns) {
        Ok(t) => t,
        Err(e) => {
            error!("ERROR: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, LOAD_ERROR_MSG).into_response();
        }
    };

    // -------------------- Filter -----------------------------
    let matched = filter_trails(&trails, &filter);
    info!("Trails search matched {} of {} records.", matched.len(), trails.len());

    // -------------------- Render -----------------------------
    match render_trails(&ctx, &filter, &matched, trails.len()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("ERROR: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, RENDER_ERROR_MSG).into_response()
        }
    }
}

// ***************************************************************************
//                          Private Functions
// ***************************************************************************
async fn read_form(http_req: &Request, body: Body) -> Result<FormValues, Errors> {
    let is_form_body = http_req.method() != Method::GET
        && http_req
            .content_type()
            .map(|ct| ct.starts_with(FORM_CONTENT_TYPE))
            .unwrap_or(false);

    let bytes = if is_form_body {
        Some(body.into_vec().await.map_err(|e| Errors::FormDecode(e.to_string()))?)
    } else {
        None
    };
    FormValues::parse(http_req.uri().query(), bytes.as_deref())
}

fn render_trails(ctx: &RuntimeCtx, filter: &TrailFilter, matched: &[Trail], total: usize) -> Result<String, Errors> {
    let mut context = Context::new();
    context.insert("title", &ctx.parms.config.title);
    context.insert("criteria", filter);
    context.insert("trails", matched);
    context.insert("count", &matched.len());
    context.insert("total", &total);

    ctx.templates
        .render(TRAILS_TEMPLATE, &context)
        .map_err(|e| Errors::TemplateRender(TRAILS_TEMPLATE.to_string(), format!("{:?}", e)))
}
