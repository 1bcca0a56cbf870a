use contracts::domain::a001_commerce::Commerce;
use contracts::domain::a002_product::Product;
use contracts::usecases::u502_publish_assistant::{
    AssistantDocument, AssistantRule, CatalogItem, CommerceCard,
};

/// Document format version consumed by the chat widget
const DOCUMENT_VERSION: u32 = 1;

/// Build the exported assistant document from a commerce and its catalog.
/// Pure data transformation; responses are written in Spanish because the
/// assistant talks to the merchant's customers.
pub fn build_document(commerce: &Commerce, products: &[Product]) -> AssistantDocument {
    AssistantDocument {
        version: DOCUMENT_VERSION,
        commerce: CommerceCard {
            id: commerce.to_string_id(),
            name: commerce.base.description.clone(),
            category: commerce.category.clone(),
            address: commerce.address.clone(),
            phone: commerce.phone.clone(),
            whatsapp: commerce.whatsapp.clone(),
        },
        hours: hours_lines(commerce),
        payment_methods: commerce
            .payment_methods
            .iter()
            .map(|m| m.label().to_string())
            .collect(),
        catalog: products.iter().map(catalog_item).collect(),
        rules: build_rules(commerce, products),
        generated_at: chrono::Utc::now(),
    }
}

fn catalog_item(product: &Product) -> CatalogItem {
    CatalogItem {
        name: product.base.description.clone(),
        code: product.base.code.clone(),
        category: product.category.clone(),
        price: product.price,
        stock: product.stock,
        description: product.detail.clone(),
    }
}

/// "lunes: 09:00 a 18:00" / "domingo: cerrado"
fn hours_lines(commerce: &Commerce) -> Vec<String> {
    commerce
        .hours
        .days()
        .iter()
        .map(|(day, schedule)| {
            if schedule.closed {
                format!("{}: cerrado", day)
            } else {
                format!("{}: {} a {}", day, schedule.open, schedule.close)
            }
        })
        .collect()
}

/// The rule set the widget evaluates in order against customer messages
fn build_rules(commerce: &Commerce, products: &[Product]) -> Vec<AssistantRule> {
    let name = &commerce.base.description;
    let mut rules = Vec::new();

    let greeting = if commerce.assistant_greeting.trim().is_empty() {
        format!("¡Hola! Bienvenido a {}. ¿En qué puedo ayudarte?", name)
    } else {
        commerce.assistant_greeting.clone()
    };
    rules.push(AssistantRule {
        intent: "greeting".to_string(),
        keywords: vec![
            "hola".into(),
            "buenas".into(),
            "buen día".into(),
            "buenos días".into(),
            "hello".into(),
        ],
        response: greeting,
    });

    rules.push(AssistantRule {
        intent: "hours".to_string(),
        keywords: vec![
            "horario".into(),
            "horarios".into(),
            "abierto".into(),
            "abren".into(),
            "cierran".into(),
        ],
        response: format!("Nuestros horarios son: {}.", hours_lines(commerce).join("; ")),
    });

    if !commerce.payment_methods.is_empty() {
        let labels: Vec<&str> = commerce.payment_methods.iter().map(|m| m.label()).collect();
        rules.push(AssistantRule {
            intent: "payments".to_string(),
            keywords: vec![
                "pago".into(),
                "pagar".into(),
                "tarjeta".into(),
                "efectivo".into(),
                "transferencia".into(),
            ],
            response: format!("Aceptamos: {}.", labels.join(", ")),
        });
    }

    if !commerce.address.trim().is_empty() {
        rules.push(AssistantRule {
            intent: "location".to_string(),
            keywords: vec![
                "dirección".into(),
                "direccion".into(),
                "ubicación".into(),
                "ubicacion".into(),
                "dónde".into(),
                "donde".into(),
            ],
            response: format!("Estamos en {}.", commerce.address),
        });
    }

    if !products.is_empty() {
        let listing: Vec<String> = products
            .iter()
            .take(20)
            .map(|p| {
                if p.price > 0.0 {
                    format!("{} (${:.2})", p.base.description, p.price)
                } else {
                    p.base.description.clone()
                }
            })
            .collect();
        rules.push(AssistantRule {
            intent: "catalog".to_string(),
            keywords: vec![
                "producto".into(),
                "productos".into(),
                "precio".into(),
                "precios".into(),
                "catálogo".into(),
                "catalogo".into(),
            ],
            response: format!("Esto es parte de lo que ofrecemos: {}.", listing.join(", ")),
        });
    }

    if !commerce.whatsapp.trim().is_empty() {
        rules.push(AssistantRule {
            intent: "contact".to_string(),
            keywords: vec!["whatsapp".into(), "contacto".into(), "teléfono".into(), "telefono".into()],
            response: format!("Podés escribirnos por WhatsApp al {}.", commerce.whatsapp),
        });
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_commerce::{CommerceDto, CommerceId, DaySchedule, PaymentMethod};
    use contracts::domain::a002_product::Product;

    fn sample_commerce() -> Commerce {
        let dto = CommerceDto {
            name: "La Esquina".to_string(),
            category: "cafetería".to_string(),
            address: "Av. Siempreviva 742".to_string(),
            whatsapp: "+54 9 11 5555-0000".to_string(),
            payment_methods: vec![PaymentMethod::Cash, PaymentMethod::MercadoPago],
            ..Default::default()
        };
        let mut commerce = Commerce::new_for_insert("user-1".into(), "COM-00001".into(), &dto);
        commerce.hours.monday = DaySchedule::open_between("09:00", "18:00");
        commerce
    }

    fn sample_product(name: &str, price: f64) -> Product {
        let mut p = Product::new_for_insert(
            CommerceId::new_v4(),
            String::new(),
            name.to_string(),
        );
        p.price = price;
        p
    }

    #[test]
    fn document_carries_profile_and_catalog() {
        let commerce = sample_commerce();
        let products = vec![sample_product("Café", 950.0)];

        let doc = build_document(&commerce, &products);
        assert_eq!(doc.commerce.name, "La Esquina");
        assert_eq!(doc.catalog.len(), 1);
        assert_eq!(doc.payment_methods, vec!["efectivo", "Mercado Pago"]);
        assert!(doc.hours.iter().any(|h| h == "lunes: 09:00 a 18:00"));
        assert!(doc.hours.iter().any(|h| h == "domingo: cerrado"));
    }

    #[test]
    fn default_greeting_mentions_the_commerce() {
        let commerce = sample_commerce();
        let doc = build_document(&commerce, &[]);

        let greeting = doc.rules.iter().find(|r| r.intent == "greeting").unwrap();
        assert!(greeting.response.contains("La Esquina"));
        assert!(greeting.keywords.contains(&"hola".to_string()));
    }

    #[test]
    fn custom_greeting_wins_over_default() {
        let mut commerce = sample_commerce();
        commerce.assistant_greeting = "¡Bienvenidos al mejor café!".to_string();
        let doc = build_document(&commerce, &[]);

        let greeting = doc.rules.iter().find(|r| r.intent == "greeting").unwrap();
        assert_eq!(greeting.response, "¡Bienvenidos al mejor café!");
    }

    #[test]
    fn catalog_rule_absent_without_products() {
        let commerce = sample_commerce();
        let doc = build_document(&commerce, &[]);
        assert!(doc.rules.iter().all(|r| r.intent != "catalog"));
    }

    #[test]
    fn wire_format_is_camel_case() {
        let commerce = sample_commerce();
        let doc = build_document(&commerce, &[]);
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("paymentMethods").is_some());
        assert!(json.get("generatedAt").is_some());
    }
}
