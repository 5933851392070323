use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::APP_VERSION;
use crate::Route;

#[function_component(Footer)]
pub fn footer() -> Html {
    let year = chrono::Utc::now().format("%Y").to_string();
    html! {
        <footer class="footer">
            <div class="container">
                <div class="footer-content grid grid-cols-4 gap-8">
                    <div class="footer-section">
                        <h4>
                            <img src="/assets/logo_small.svg" alt="AcaiStack" class="footer-brand-logo" width="20" height="20" />
                            {"AcaiStack"}
                        </h4>
                        <p>{"Beautiful websites powered by intelligent AI agents. You get the control."}</p>
                    </div>
                    <div class="footer-section">
                        <h4>{"Navigation"}</h4>
                        <ul>
                            <li><Link<Route> to={Route::Home}>{"Home"}</Link<Route>></li>
                            <li><a href="#services">{"Services"}</a></li>
                            <li><a href="#portfolio">{"Portfolio"}</a></li>
                            <li><Link<Route> to={Route::Faq}>{"FAQ"}</Link<Route>></li>
                        </ul>
                    </div>
                    <div class="footer-section">
                        <h4>{"Company"}</h4>
                        <ul>
                            <li><Link<Route> to={Route::Contact}>{"Contact Us"}</Link<Route>></li>
                        </ul>
                    </div>
                    <div class="footer-section">
                        <h4>{"Connect"}</h4>
                        <ul>
                            <li><a href="https://github.com" rel="noopener noreferrer">{"GitHub"}</a></li>
                            <li><a href="https://linkedin.com" rel="noopener noreferrer">{"LinkedIn"}</a></li>
                            <li><a href="mailto:hello@acaistack.dev">{"Email Us"}</a></li>
                        </ul>
                    </div>
                </div>
                <div class="footer-bottom">
                    <p>{format!("© {} AcaiStack. All rights reserved.", year)}</p>
                    <p class="footer-version">{format!("v{}", APP_VERSION)}</p>
                </div>
            </div>
        </footer>
    }
}
