//! Ordered synonym table mapping raw document phrases to canonical
//! communication-type names.
//!
//! Scan order is significant. The generic sewer entry deliberately
//! precedes the pressurized and gravity variants: when plain
//! "Канализация" is on the allow-list it absorbs all sewer mentions, and
//! the variants only become reachable once it is disabled. Patterns
//! tolerate the usual OCR damage: dropped endings, glued abbreviations,
//! Latin lookalike letters.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `(pattern, canonical name)` pairs in scan order.
    pub static ref SYNONYMS: Vec<(Regex, &'static str)> = vec![
        // Communications
        (Regex::new(r"(?i)кабел[ьи]?\s*связ[и]?").unwrap(), "Кабель связи"),
        (Regex::new(r"(?i)тел[е]?\s*канализац[ия]{2,4}").unwrap(), "Тел канализация"),
        (Regex::new(r"(?i)кабел[ьи]?\s*канализац[ия]{2,4}").unwrap(), "Кабельная канализация"),
        (
            Regex::new(r"(?i)волоконно-?\s*оптическ[ая]?\s*лини[яи]?\s*связ[и]?").unwrap(),
            "ВОЛС",
        ),
        (Regex::new(r"(?i)кабел[ьное]?\s*телевидени[е]?").unwrap(), "КТВ"),
        // Power
        (Regex::new(r"(?i)эл[ек]?\s*кабел[ья]?").unwrap(), "Эл кабель"),
        (
            Regex::new(r"(?i)кабел[ь]?\s*техн[\.]?\s*и\s*очаг[\.]?\s*заземл[ения]?").unwrap(),
            "Кабель техн. и очаг. заземл",
        ),
        (Regex::new(r"(?i)контур\s*заземл[ения]?").unwrap(), "Контур заземл"),
        (Regex::new(r"(?i)кабел[ь]?\s*н[оo0]").unwrap(), "Кабель но"),
        (Regex::new(r"(?i)наружн[ое]?\s*освещени[е]").unwrap(), "Кабель но"),
        // Water supply and drainage
        (Regex::new(r"(?i)ливнев[ая]?\s*канализац[ия]{2,4}").unwrap(), "Водосток"),
        (Regex::new(r"(?i)вод-?д").unwrap(), "Вод-д"),
        (Regex::new(r"(?i)водопровод").unwrap(), "Вод-д"),
        (Regex::new(r"(?i)трубопровод").unwrap(), "Трубопровод"),
        (Regex::new(r"(?i)канализац[ия]{2,4}\s*хоз-?быт").unwrap(), "Канализация хоз-быт"),
        (Regex::new(r"(?i)хоз-?бытов[ая]?\s*канализац[ия]{2,4}").unwrap(), "Канализация хоз-быт"),
        (Regex::new(r"(?i)лос\b").unwrap(), "ЛОС"),
        (Regex::new(r"(?i)локальн[ые]?\s*очистн[ые]?\s*сооружени[я]").unwrap(), "ЛОС"),
        (Regex::new(r"(?i)дренаж").unwrap(), "Дренаж"),
        // Heating and ventilation
        (Regex::new(r"(?i)воздухопровод").unwrap(), "Воздухопровод"),
        (Regex::new(r"(?i)вент[\.]?\s*ветк[и]?").unwrap(), "Вент. ветки"),
        (Regex::new(r"(?i)вентиляционн[ые]?\s*ветк[и]?").unwrap(), "Вент. ветки"),
        (Regex::new(r"(?i)теплотрасса").unwrap(), "Теплотрасса"),
        (Regex::new(r"(?i)теплов[ые]?\s*сет[и]?").unwrap(), "Теплотрасса"),
        // Infrastructure and pipelines
        (Regex::new(r"(?i)коллектор").unwrap(), "Коллектор"),
        (Regex::new(r"(?i)газопровод").unwrap(), "Газопровод"),
        (Regex::new(r"(?i)нефтепровод").unwrap(), "Нефтепровод"),
        (Regex::new(r"(?i)продуктопровод").unwrap(), "Продуктопровод"),
        // Special systems
        (Regex::new(r"(?i)соуэ\b").unwrap(), "СОУЭ"),
        (
            Regex::new(r"(?i)систем[аы]?\s*оповещени[я]?\s*и\s*управлен[ие]?\s*эвакуаци[ей]")
                .unwrap(),
            "СОУЭ",
        ),
        (Regex::new(r"(?i)скуд\b").unwrap(), "СКУД"),
        (
            Regex::new(r"(?i)систем[аы]?\s*контрол[я]?\s*управлени[я]?\s*доступом").unwrap(),
            "СКУД",
        ),
        // Sewer: generic first, then the pressurized and gravity variants
        (Regex::new(r"(?i)\bканализац(?:ия)?\b").unwrap(), "Канализация"),
        (
            Regex::new(r"(?i)нап[оo]рн[аяые]?\s*канализац[ия]{2,4}|нап\.?\s*канализац").unwrap(),
            "Нап канализация",
        ),
        (
            Regex::new(r"(?i)сам[о]?течн[аяые]?\s*канализац[ия]{2,4}|сам\.?\s*канализац").unwrap(),
            "Сам канализация",
        ),
        (Regex::new(r"(?i)водовыпуск").unwrap(), "Водовыпуск"),
        (Regex::new(r"(?i)кабел[ьи]?\s*защ").unwrap(), "Кабель защ"),
        (Regex::new(r"(?i)\bгаз\b").unwrap(), "Газ"),
        (Regex::new(r"(?i)тепл(?:о|\.|\b)").unwrap(), "Теплотрасса"),
    ];
}
