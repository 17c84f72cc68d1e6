//! NestJS controller scanning.
//!
//! Routes are recovered with plain regular expressions over the file text.
//! Nothing is parsed or evaluated, so decorator-shaped text inside comments
//! or string literals also produces routes.

use crate::models::{HttpMethod, Route};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Name given to controllers whose class declaration was not found.
pub const UNKNOWN_CONTROLLER: &str = "Unknown";

static CONTROLLER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@Controller\(\s*(?:['"`]([^'"`]*)['"`])?"#)
        .expect("Failed to compile controller regex")
});

static CLASS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"export\s+class\s+(\w+)").expect("Failed to compile class regex"));

/// Verb decorators in scan order, paired with the method they declare.
static VERB_REGEXES: Lazy<Vec<(HttpMethod, Regex)>> = Lazy::new(|| {
    [
        ("Get", HttpMethod::GET),
        ("Post", HttpMethod::POST),
        ("Put", HttpMethod::PUT),
        ("Delete", HttpMethod::DELETE),
        ("Patch", HttpMethod::PATCH),
    ]
    .into_iter()
    .map(|(decorator, method)| {
        let pattern = format!(r#"@{}\(\s*(?:['"`]([^'"`]*)['"`])?"#, decorator);
        let regex = Regex::new(&pattern).expect("Failed to compile verb decorator regex");
        (method, regex)
    })
    .collect()
});

/// Extracts the class-level route prefix. Absent or argument-less ⇒ `""`.
pub fn extract_base_path(content: &str) -> String {
    CONTROLLER_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Extracts the exported controller class name.
pub fn extract_controller_name(content: &str) -> String {
    CLASS_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_CONTROLLER.to_string())
}

/// Joins the controller prefix and a decorator sub-path into a route path.
///
/// The result is normalized by [`Route::new`].
pub fn join_route_path(base_path: &str, sub_path: &str) -> String {
    if sub_path.is_empty() {
        format!("/{}", base_path)
    } else {
        format!("/{}/{}", base_path, sub_path)
    }
}

/// Parses one controller file's text into routes.
///
/// Every occurrence of a verb decorator yields a route, duplicates included.
///
/// # Examples
///
/// ```
/// use api_tester::scanner::nest::parse_nest_controller;
/// use std::path::Path;
///
/// let source = r#"
/// @Controller('users')
/// export class UsersController {
///   @Get(':id')
///   findOne() {}
/// }
/// "#;
///
/// let routes = parse_nest_controller(source, Path::new("users.controller.ts"));
/// assert_eq!(routes.len(), 1);
/// assert_eq!(routes[0].path, "/users/:id");
/// ```
pub fn parse_nest_controller(content: &str, file_path: &Path) -> Vec<Route> {
    let base_path = extract_base_path(content);
    let controller_name = extract_controller_name(content);
    let mut routes = Vec::new();

    for (method, regex) in VERB_REGEXES.iter() {
        for caps in regex.captures_iter(content) {
            let sub_path = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            routes.push(Route::new(
                *method,
                &join_route_path(&base_path, sub_path),
                file_path.to_path_buf(),
                Some(controller_name.clone()),
            ));
        }
    }

    log::debug!(
        "{}: {} route(s) in {}",
        file_path.display(),
        routes.len(),
        controller_name
    );

    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    const USERS_CONTROLLER: &str = r#"
import { Controller, Get, Post, Put, Delete, Patch, Body, Param } from '@nestjs/common';

@Controller('users')
export class UsersController {
  @Get()
  findAll() {}

  @Get(':id')
  findOne(@Param('id') id: string) {}

  @Post()
  create(@Body() dto: CreateUserDto) {}

  @Put(':id')
  replace() {}

  @Patch(':id')
  update() {}

  @Delete(':id')
  remove() {}
}
"#;

    fn paths(routes: &[Route]) -> Vec<String> {
        routes.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_parse_full_controller() {
        let routes = parse_nest_controller(USERS_CONTROLLER, Path::new("users.controller.ts"));
        assert_eq!(
            paths(&routes),
            vec![
                "GET /users",
                "GET /users/:id",
                "POST /users",
                "PUT /users/:id",
                "DELETE /users/:id",
                "PATCH /users/:id",
            ]
        );
        assert!(routes
            .iter()
            .all(|r| r.controller_name.as_deref() == Some("UsersController")));
        assert!(routes
            .iter()
            .all(|r| r.source_file == Path::new("users.controller.ts")));
    }

    #[test]
    fn test_controller_without_prefix() {
        let source = "@Controller()\nexport class AppController {\n  @Get('health')\n  health() {}\n}";
        let routes = parse_nest_controller(source, Path::new("app.controller.ts"));
        assert_eq!(paths(&routes), vec!["GET /health"]);
    }

    #[test]
    fn test_controller_without_prefix_or_subpath() {
        let source = "@Controller()\nexport class AppController {\n  @Get()\n  root() {}\n}";
        let routes = parse_nest_controller(source, Path::new("app.controller.ts"));
        assert_eq!(paths(&routes), vec!["GET /"]);
    }

    #[test]
    fn test_slashes_are_normalized() {
        let source = "@Controller('/api/')\nexport class A {\n  @Get('/items/')\n  items() {}\n}";
        let routes = parse_nest_controller(source, Path::new("a.controller.ts"));
        assert_eq!(paths(&routes), vec!["GET /api/items/"]);
    }

    #[test]
    fn test_double_quotes_and_whitespace() {
        let source = "@Controller(\"orders\")\nexport class OrdersController {\n  @Post( \"checkout\" )\n  checkout() {}\n}";
        let routes = parse_nest_controller(source, Path::new("orders.controller.ts"));
        assert_eq!(paths(&routes), vec!["POST /orders/checkout"]);
    }

    #[test]
    fn test_missing_class_uses_placeholder() {
        let source = "@Controller('x')\nclass Hidden {\n  @Get()\n  a() {}\n}";
        let routes = parse_nest_controller(source, Path::new("x.controller.ts"));
        assert_eq!(routes[0].controller_name.as_deref(), Some(UNKNOWN_CONTROLLER));
    }

    #[test]
    fn test_duplicate_decorators_are_kept() {
        let source = "@Controller('p')\nexport class P {\n  @Get('/x')\n  a() {}\n  @Get('/x')\n  b() {}\n  @Get('/x')\n  c() {}\n}";
        let routes = parse_nest_controller(source, Path::new("p.controller.ts"));
        assert_eq!(routes.len(), 3);
        assert!(routes
            .iter()
            .all(|r| r.method == HttpMethod::GET && r.path == "/p/x"));
    }

    #[test]
    fn test_file_without_decorators() {
        let source = "export class NotAController {}";
        assert!(parse_nest_controller(source, Path::new("n.controller.ts")).is_empty());
    }

    #[test]
    fn test_matches_inside_comments() {
        // Lexical matching: commented-out decorators still count.
        let source = "@Controller('c')\nexport class C {\n  // @Delete('old')\n}";
        let routes = parse_nest_controller(source, Path::new("c.controller.ts"));
        assert_eq!(paths(&routes), vec!["DELETE /c/old"]);
    }

    #[test]
    fn test_similar_decorator_names_do_not_match() {
        let source = "@Controller('c')\nexport class C {\n  @GetUser()\n  @Getter\n  a() {}\n}";
        assert!(parse_nest_controller(source, Path::new("c.controller.ts")).is_empty());
    }

    #[test]
    fn test_join_route_path() {
        assert_eq!(join_route_path("", ""), "/");
        assert_eq!(join_route_path("users", ""), "/users");
        assert_eq!(join_route_path("users", ":id"), "/users/:id");
    }
}
