use maud::{html, Markup};

/// Returns the partial HTML content for the success message.
/// Swapped in place of the login form, so no surrounding layout.
pub fn check_email_content(email: &str) -> Markup {
    html! {
        div class="text-center py-8 px-4 fade-in" {
            h3 { "Check your email" }

            div class="mt-2" {
                p class="muted" {
                    "We sent a sign-in link to "
                    strong { (email) }
                    "."
                }
                p class="muted" {
                    "Click the link in the email to sign in."
                }
            }

            div class="mt-6" {
                a href="/login" { "Try with a different email" }
            }
        }
    }
}
