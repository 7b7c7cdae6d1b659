use crate::{funpay::ExtractedItem, hunter::RawPreview};
use html_escape::{encode_double_quoted_attribute, encode_text};

const BACK: &str = r#"<a href="/">← Назад</a>"#;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{}</title>
    <style>
        body {{ font-family: Arial; margin: 20px; }}
        .btn {{ display: inline-block; padding: 10px 20px; margin: 5px; background: #007bff; color: white; text-decoration: none; border-radius: 5px; }}
        .btn-orange {{ background: #fd7e14; }}
        .item {{ border: 1px solid #ddd; padding: 15px; margin: 10px; }}
        .empty {{ background: #f8d7da; padding: 20px; border-radius: 5px; }}
        pre {{ background: #f5f5f5; padding: 20px; overflow: auto; max-height: 500px; }}
    </style>
</head>
<body>
{}
</body>
</html>
"#,
        encode_text(title),
        body
    )
}

pub fn index(now: &str, found: usize, monitoring: bool) -> String {
    let body = format!(
        r#"<h1>FunPay Hunter - Debug Version</h1>
<p><strong>Статус:</strong> Сервер работает</p>
<p><strong>Время:</strong> {}</p>
<p><strong>Последний парсинг:</strong> {} товаров</p>
<p><strong>Мониторинг:</strong> {}</p>
<h3>Тестирование:</h3>
<a href="/debug" class="btn btn-orange">Дебаг-анализ</a>
<a href="/parse" class="btn">Простой парсинг</a>
<a href="/raw" class="btn">Посмотреть HTML</a>
<h3>Инструкция:</h3>
<ol>
    <li>Нажмите "Дебаг-анализ" для анализа структуры FunPay</li>
    <li>Нажмите "Простой парсинг" для поиска товаров</li>
    <li>Проверьте логи сервера</li>
</ol>"#,
        encode_text(now),
        found,
        if monitoring { "включен" } else { "выключен" }
    );
    page("FunPay Hunter - Debug Version", &body)
}

pub fn debug_done() -> String {
    let body = format!(
        r#"{}
<h2>Дебаг-анализ выполнен</h2>
<p>Проверьте логи сервера.</p>
<p>Там будет информация о структуре страницы FunPay.</p>"#,
        BACK
    );
    page("Дебаг-анализ", &body)
}

pub fn parse_result(items: &[ExtractedItem]) -> String {
    let result = if items.is_empty() {
        r#"<div class="empty">
    <h2>Товары не найдены</h2>
    <p>Парсер не смог найти подходящие товары.</p>
    <p>Возможные причины:</p>
    <ul>
        <li>Изменена структура FunPay</li>
        <li>На странице нет товаров в данный момент</li>
        <li>FunPay блокирует запросы</li>
    </ul>
    <p>Нажмите <a href="/raw">"Посмотреть HTML"</a> чтобы увидеть сырую страницу.</p>
</div>"#
            .to_string()
    } else {
        let mut result = format!("<h2>Найдено {} товаров:</h2>\n", items.len());
        for item in items {
            result.push_str(&format!(
                r#"<div class="item">
    <h4>{}</h4>
    <p><strong>Цена:</strong> {} руб.</p>
    <p><strong>Текст:</strong> {}</p>
    <p><a href="{}" target="_blank">Ссылка</a></p>
</div>
"#,
                encode_text(&item.title),
                item.price,
                encode_text(&item.full_text),
                encode_double_quoted_attribute(&item.link)
            ));
        }
        result
    };
    page("Парсинг", &format!("{}\n{}", BACK, result))
}

pub fn raw(preview: &RawPreview) -> String {
    let body = format!(
        r#"{}
<h2>Сырой HTML (первые {} символов):</h2>
<pre>{}</pre>
<p><strong>Полный размер:</strong> {} символов</p>
<p><strong>Статус:</strong> {}</p>"#,
        BACK,
        crate::hunter::PREVIEW_CHARS,
        encode_text(&preview.preview),
        preview.total_chars,
        preview.status
    );
    page("Raw HTML", &body)
}

pub fn raw_error(message: &str) -> String {
    page(
        "Ошибка",
        &format!("<h2>Ошибка: {}</h2>\n{}", encode_text(message), BACK),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn link_attribute_is_quoted() {
        let item = ExtractedItem {
            id: "abc_500".to_string(),
            title: "Black Russia 500 руб".to_string(),
            price: 500,
            link: r#"https://funpay.com/offer?id=9"&x=<1>"#.to_string(),
            full_text: "Black Russia 500 руб".to_string(),
        };
        let html = parse_result(&[item]);
        assert!(html.contains(r#"href="https://funpay.com/offer?id=9&quot;&amp;x=&lt;1&gt;""#));
    }

    #[test]
    fn item_text_is_escaped() {
        let item = ExtractedItem {
            id: "abc_500".to_string(),
            title: "<script>Black Russia</script>".to_string(),
            price: 500,
            link: "https://funpay.com/offer/9".to_string(),
            full_text: "<script>Black Russia</script> 500 руб".to_string(),
        };
        let html = parse_result(&[item]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("<h4>&lt;script&gt;Black Russia&lt;/script&gt;</h4>"));
    }
}
