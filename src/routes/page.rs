use std::sync::Arc;

use poem::{
    handler,
    web::{Data, Html, Query},
};
use serde::Deserialize;

use crate::{
    AppState,
    core::{template::generate_html, view::ViewState},
};

#[derive(Deserialize)]
pub struct PageQuery {
    pub url: Option<String>,
}

/// The generator page. A `url` in the query string is a form submission.
#[handler]
pub async fn index(Query(query): Query<PageQuery>, state: Data<&Arc<AppState>>) -> Html<String> {
    let state_view = match query.url {
        Some(url) => {
            let mut view = ViewState::with_input(url);
            view.submit(state.proxy.as_ref()).await;
            view
        }
        None => ViewState::default(),
    };

    Html(generate_html(&state_view))
}
