//! Brands and their themes

use crate::okta::models::{Brand, Theme};
use crate::okta::OktaService;
use crate::resource::{
    Attributes, Extra, FetchContext, FetchError, Generator, ResourceDescriptor, ResourceSet,
};
use async_trait::async_trait;

pub struct BrandGenerator {
    service: OktaService,
}

impl BrandGenerator {
    pub const RESOURCE_KIND: &'static str = "okta_brand";

    pub fn new(service: OktaService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Generator for BrandGenerator {
    fn service(&self) -> &'static str {
        "brand"
    }

    fn resource_kind(&self) -> &'static str {
        Self::RESOURCE_KIND
    }

    async fn init_resources(&self) -> Result<Vec<ResourceDescriptor>, FetchError> {
        let brands = self
            .service
            .client_v5()
            .list_brands()
            .await
            .fetch_context("listing brands")?;

        let mut resources = ResourceSet::new(Self::RESOURCE_KIND);
        for brand in &brands {
            resources.push(ResourceDescriptor::assemble_simple(
                &brand.id,
                self.service.resource_name(&format!("{}_{}", brand.id, brand.name)),
                Self::RESOURCE_KIND,
            ));
        }

        Ok(resources.finish())
    }
}

pub struct ThemeGenerator {
    service: OktaService,
}

impl ThemeGenerator {
    pub const RESOURCE_KIND: &'static str = "okta_theme";

    pub fn new(service: OktaService) -> Self {
        Self { service }
    }
}

fn theme_attributes(brand: &Brand, theme: &Theme) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert("brand_id".to_string(), brand.id.clone());

    let optional = [
        ("primary_color_hex", &theme.primary_color_hex),
        ("secondary_color_hex", &theme.secondary_color_hex),
        (
            "sign_in_page_touch_point_variant",
            &theme.sign_in_page_touch_point_variant,
        ),
        (
            "end_user_dashboard_touch_point_variant",
            &theme.end_user_dashboard_touch_point_variant,
        ),
        (
            "error_page_touch_point_variant",
            &theme.error_page_touch_point_variant,
        ),
        (
            "email_template_touch_point_variant",
            &theme.email_template_touch_point_variant,
        ),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            attributes.insert(key.to_string(), value.clone());
        }
    }

    attributes
}

#[async_trait]
impl Generator for ThemeGenerator {
    fn service(&self) -> &'static str {
        "theme"
    }

    fn resource_kind(&self) -> &'static str {
        Self::RESOURCE_KIND
    }

    async fn init_resources(&self) -> Result<Vec<ResourceDescriptor>, FetchError> {
        let client = self.service.client_v5();
        let brands = client
            .list_brands()
            .await
            .fetch_context("listing brands for themes")?;

        let mut resources = ResourceSet::new(Self::RESOURCE_KIND);
        for brand in &brands {
            let themes = client
                .list_brand_themes(&brand.id)
                .await
                .fetch_context_for("listing themes for brand", &brand.id)?;

            for theme in &themes {
                resources.push(ResourceDescriptor::assemble(
                    format!("{}/{}", brand.id, theme.id),
                    self.service
                        .resource_name(&format!("{}_{}", brand.id, theme.id)),
                    Self::RESOURCE_KIND,
                    theme_attributes(brand, theme),
                    vec![brand.id.clone()],
                    Extra::new(),
                ));
            }
        }

        Ok(resources.finish())
    }
}
