use maud::{html, Markup};

/// The sign-in form. Posts to the request-link endpoint, which answers
/// with the check-your-email partial swapped in place of this form.
pub fn email_cta_form() -> Markup {
    html! {
        form
            id="login-form"
            action="/auth/request-link"
            method="post"
            hx-post="/auth/request-link"
            hx-target="#login-form"
            hx-swap="outerHTML"
        {
            label for="email" { "Email address" }
            input
                type="email"
                id="email"
                name="email"
                required
                placeholder="you@example.com";
            button type="submit" { "Email me a sign-in link" }
        }
    }
}
