use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <main id="main-content" class="not-found">
            <h1>{"404 - Not Found"}</h1>
            <Link<Route> to={Route::Home} classes="btn btn-secondary">{"Back to home"}</Link<Route>>
        </main>
    }
}
