use js_sys::Array;
use sheetfeed::Table;
use wasm_bindgen::JsValue;

/// Rows as a JS array of string arrays, built directly without a JSON pass
pub fn table_to_js(table: &Table) -> JsValue {
    let rows = Array::new_with_length(table.len() as u32);
    for (i, row) in table.iter().enumerate() {
        let cells = Array::new_with_length(row.len() as u32);
        for (j, cell) in row.cells().iter().enumerate() {
            cells.set(j as u32, JsValue::from_str(cell));
        }
        rows.set(i as u32, cells.into());
    }
    rows.into()
}
