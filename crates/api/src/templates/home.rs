use maud::{html, Markup, DOCTYPE};

/// Routes advertised on the welcome page, in display order
pub const ROUTES: &[&str] = &[
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/start=YYYY-MM-DD",
    "/api/v1.0/start=YYYY-MM-DD/end=YYYY-MM-DD",
];

pub fn home_page(api_base: &str) -> Markup {
    let rule = "-".repeat(66);
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { "Climate API" }
            }
            body {
                b { "Climate API" } br;
                (rule) br;
                b { "Available Routes:" } br;
                @for route in ROUTES {
                    a href=(format!("{}{}", api_base, route)) { (route) } br;
                }
                (rule) br;
                b { "Note:" } br;
                "* Route " b { "tobs" } " shows the last year of results for the most active station." br;
                "* The " b { "date format" } " will be YYYY-MM-DD." br;
                "* API documentation is served at " a href=(format!("{}/docs", api_base)) { "/docs" } "."
            }
        }
    }
}
