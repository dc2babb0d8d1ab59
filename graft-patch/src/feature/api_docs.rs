//! API documentation feature: swagger-jsdoc spec generation served through
//! swagger-ui-express.

use graft_core::{CodeBuilder, Indent};
use graft_ts::{
    Block, CallSpec, ConstructorEdit, EditOperation, ImportDeclaration, ImportEdit, MethodEdit,
    MethodSpec, NamedImportEdit, Param, Visibility,
};

use super::{Feature, FeaturePlan};
use crate::config::ApiDocsConfig;

const JSDOC_MODULE: &str = "swagger-jsdoc";
const JSDOC_BINDING: &str = "swaggerJSDoc";
const UI_MODULE: &str = "swagger-ui-express";
const UI_BINDING: &str = "swaggerUi";
const PREFIX_PARAM: &str = "apiPrefix";
/// Default for the prefix parameter of a constructor graft has to create.
const DEFAULT_PREFIX: &str = "'/api/v1'";

/// Build the edit plan for the API documentation feature.
pub fn api_docs_plan(config: &ApiDocsConfig, indent: Indent) -> FeaturePlan {
    let anchors = &config.anchors;
    let body = ApiDocsBody::new(config, indent).to_block();

    let mut call = ConstructorEdit::new(
        CallSpec::new(&config.method)
            .forward(Param::typed(PREFIX_PARAM, "string").with_default(DEFAULT_PREFIX)),
    );
    call.before = anchors.call_before().map(String::from);
    call.after = anchors.call_after().map(String::from);

    let edits = vec![
        EditOperation::InsertImport(ImportEdit::new(
            ImportDeclaration::new(JSDOC_MODULE).default_binding(JSDOC_BINDING),
            anchors.import_after(),
        )),
        EditOperation::InsertImport(ImportEdit::new(
            ImportDeclaration::new(UI_MODULE).default_binding(UI_BINDING),
            Some(JSDOC_MODULE),
        )),
        EditOperation::EnsureNamedImport(NamedImportEdit::new(
            &config.env_module,
            &config.server_url_var,
        )),
        EditOperation::InsertMethod(MethodEdit::new(
            MethodSpec::new(&config.method, body)
                .visibility(Visibility::Private)
                .param(Param::typed(PREFIX_PARAM, "string")),
            anchors.method_before(),
        )),
        EditOperation::InsertConstructorStatement(call),
    ];

    FeaturePlan {
        feature: Feature::ApiDocs,
        edits,
    }
}

/// Generator for the body of the documentation setup method.
///
/// The output depends only on the configuration: an options object for
/// swagger-jsdoc, the generated spec, and the route registration.
pub struct ApiDocsBody<'a> {
    config: &'a ApiDocsConfig,
    indent: Indent,
}

impl<'a> ApiDocsBody<'a> {
    pub fn new(config: &'a ApiDocsConfig, indent: Indent) -> Self {
        Self { config, indent }
    }

    pub fn render(&self) -> String {
        let config = self.config;
        let server_url = format!(
            "{} || `http://localhost:${{this.port}}${{{}}}`",
            config.server_url_var, PREFIX_PARAM
        );
        let apis: Vec<String> = config.apis.iter().map(|api| js_string(api)).collect();

        CodeBuilder::new(self.indent)
            .block_with_close("const options = {", "};", |b| {
                b.block_with_close("swaggerDefinition: {", "},", |b| {
                    b.line(&format!("openapi: {},", js_string(&config.openapi)))
                        .block_with_close("info: {", "},", |b| {
                            b.line(&format!("title: {},", js_string(&config.title)))
                                .line(&format!("version: {},", js_string(&config.version)))
                                .line(&format!(
                                    "description: {},",
                                    js_string(&config.description)
                                ))
                        })
                        .block_with_close("servers: [", "],", |b| {
                            b.block_with_close("{", "},", |b| {
                                b.line(&format!("url: {},", server_url)).line(
                                    "description: this.env === 'production' ? 'Production server' : 'Local server',",
                                )
                            })
                        })
                        .when(config.bearer_auth, |b| {
                            b.block_with_close("components: {", "},", |b| {
                                b.block_with_close("securitySchemes: {", "},", |b| {
                                    b.block_with_close("bearerAuth: {", "},", |b| {
                                        b.line("type: 'http',")
                                            .line("scheme: 'bearer',")
                                            .line("bearerFormat: 'JWT',")
                                    })
                                })
                            })
                        })
                })
                .line(&format!("apis: [{}],", apis.join(", ")))
            })
            .blank()
            .line(&format!("const specs = {}(options);", JSDOC_BINDING))
            .line(&format!(
                "this.app.use({}, {ui}.serve, {ui}.setup(specs));",
                js_string(&config.route),
                ui = UI_BINDING
            ))
            .build()
    }

    pub fn to_block(&self) -> Block {
        Block::from_text(&self.render())
    }
}

/// Single-quoted JavaScript string literal.
fn js_string(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_body() {
        let body = ApiDocsBody::new(&ApiDocsConfig::default(), Indent::TYPESCRIPT).render();
        assert_eq!(
            body,
            r#"const options = {
  swaggerDefinition: {
    openapi: '3.0.0',
    info: {
      title: 'REST API',
      version: '1.0.0',
      description: 'Example API Documentation',
    },
    servers: [
      {
        url: API_SERVER_URL || `http://localhost:${this.port}${apiPrefix}`,
        description: this.env === 'production' ? 'Production server' : 'Local server',
      },
    ],
    components: {
      securitySchemes: {
        bearerAuth: {
          type: 'http',
          scheme: 'bearer',
          bearerFormat: 'JWT',
        },
      },
    },
  },
  apis: ['swagger.yaml', 'src/controllers/*.ts'],
};

const specs = swaggerJSDoc(options);
this.app.use('/api-docs', swaggerUi.serve, swaggerUi.setup(specs));
"#
        );
    }

    #[test]
    fn test_body_follows_config() {
        let config = ApiDocsConfig {
            title: "Bob's API".to_string(),
            route: "/docs".to_string(),
            bearer_auth: false,
            apis: vec!["src/routes/*.ts".to_string()],
            ..ApiDocsConfig::default()
        };
        let body = ApiDocsBody::new(&config, Indent::TYPESCRIPT).render();
        assert!(body.contains("title: 'Bob\\'s API',"));
        assert!(body.contains("apis: ['src/routes/*.ts'],"));
        assert!(body.contains("this.app.use('/docs', swaggerUi.serve"));
        assert!(!body.contains("bearerAuth"));
    }

    #[test]
    fn test_plan_order() {
        let plan = api_docs_plan(&ApiDocsConfig::default(), Indent::TYPESCRIPT);
        let names: Vec<String> = plan.edits.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            [
                "import 'swagger-jsdoc'",
                "import 'swagger-ui-express'",
                "bind API_SERVER_URL from '@config/env'",
                "method initializeSwagger()",
                "constructor call this.initializeSwagger()",
            ]
        );
    }
}
