use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, signed_in: bool, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Naturestay" }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    a href="/" class="brand" {
                        svg
                            xmlns="http://www.w3.org/2000/svg"
                            width="24"
                            height="24"
                            viewBox="0 0 24 24"
                            fill="none"
                            stroke="#2f7d4f"
                            stroke-width="2"
                            stroke-linecap="round"
                            stroke-linejoin="round"
                        {
                            path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                            path d="M12 3l8 9h-3v8h-10v-8h-3z" {}
                        }
                        h3 { "Naturestay" }
                    }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/search" { "Find a stay" } }
                            @if signed_in {
                                li { a href="/host" { "Host" } }
                                li { a href="/account" { "Account" } }
                            }
                        }
                    }

                    @if signed_in {
                        form action="/auth/logout" method="post" class="inline" {
                            button type="submit" class="link-button" { "Sign out" }
                        }
                    } @else {
                        a href="/login" class="text-base font-medium hover:text-blue-600" { "Sign in" }
                    }
                }
                (content)
            }
        }
    }
}
