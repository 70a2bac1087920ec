// The fixed instruction sent to the model.
//
// The model answers with two tagged versions of an 8-tweet educational
// thread; the `[ID]` / `[EN]` markers it is asked to use are what the
// formatter later splits on.

/// Only this many characters of page text are embedded in the prompt.
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Build the generation prompt for a product and its scraped page text.
pub fn build_prompt(content: &str, product_name: &str) -> String {
    let content: String = content.chars().take(MAX_CONTENT_CHARS).collect();
    format!(
        "\
Anda adalah ahli konten edukasi crypto. Buat Twitter thread bilingual dari konten berikut:

INSTRUKSI:
1. Buat dalam 2 versi:
   - Bahasa Indonesia (awali dengan [ID])
   - English (awali dengan [EN])
2. Struktur masing-masing versi:
   - Tweet 1: Hook menarik
   - Tweet 2: Poin utama
   - Tweet 3: Solusi Produk
   - Tweet 4: Perbandingan
   - Tweet 5: Data
   - Tweet 6: CTA halus
   - Tweet 7: FAQ
   - Tweet 8: Kesimpulan
3. Gunakan emoji dan bahasa natural
4. Maksimal 8 tweet per bahasa

DATA PRODUK:
Nama: {product_name}
Konten website: {content}
"
    )
}
