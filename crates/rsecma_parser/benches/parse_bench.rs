use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rsecma_parser::{parse, ParseOptions};

// A medium-size module with most statement and expression forms
const JAVASCRIPT_SOURCE: &str = r#"
import { readFile } from './fs.js';
import * as path from './path.js';

const DEFAULTS = { retries: 3, timeout: 1000, verbose: false };

export class Loader {
    #cache = new Map();
    static instances = 0;

    constructor(root, options = {}) {
        this.root = root;
        this.options = { ...DEFAULTS, ...options };
        Loader.instances++;
    }

    get size() {
        return this.#cache.size;
    }

    async load(name) {
        if (this.#cache.has(name)) return this.#cache.get(name);
        const file = path.join(this.root, `${name}.json`);
        for (let attempt = 0; attempt < this.options.retries; attempt++) {
            try {
                const text = await readFile(file, 'utf8');
                const value = JSON.parse(text);
                this.#cache.set(name, value);
                return value;
            } catch (err) {
                if (attempt + 1 >= this.options.retries) throw err;
            }
        }
    }

    *entries() {
        for (const [key, value] of this.#cache) {
            yield { key, value };
        }
    }
}

export function summarize(items) {
    const totals = items
        .filter(item => item?.enabled ?? true)
        .map(({ price, count = 1 }) => price * count)
        .reduce((sum, n) => sum + n, 0);
    const label = totals > 100 ? 'large' : totals > 10 ? 'medium' : 'small';
    return { totals, label, ratio: totals / items.length || 0, mask: totals >>> 0 };
}

label: for (const x of [1, 2, 3]) {
    switch (x % 3) {
        case 0: continue label;
        case 1: break;
        default: console.log(/x+/g.test(String(x)));
    }
}

export default summarize;
"#;

// The same shapes with type syntax to erase
const TYPESCRIPT_SOURCE: &str = r#"
interface Item { price: number; count?: number; enabled?: boolean }
type Label = 'large' | 'medium' | 'small';

export class Loader<T extends object = {}> implements Iterable<[string, T]> {
    private cache = new Map<string, T>();
    constructor(private readonly root: string, public options: Partial<Options> = {}) {}

    async load(name: string): Promise<T | undefined> {
        const value = this.cache.get(name) as T | undefined;
        return value!;
    }

    *[Symbol.iterator](): Iterator<[string, T]> {
        yield* this.cache.entries();
    }
}

export function summarize<I extends Item>(items: readonly I[]): { totals: number; label: Label } {
    const totals = items.map(({ price, count = 1 }): number => price * count).reduce((a, b) => a + b, 0);
    const label: Label = totals > 100 ? 'large' : totals > 10 ? 'medium' : 'small';
    return { totals, label } satisfies { totals: number; label: Label };
}

declare module 'fs' { export function readFile(path: string): Promise<string>; }
export type { Item, Label };
"#;

fn bench_parse_javascript(c: &mut Criterion) {
    let options = ParseOptions::default().module();
    c.bench_function("parse_javascript_medium", |b| {
        b.iter(|| {
            let program = parse(black_box(JAVASCRIPT_SOURCE), &options);
            black_box(program).ok();
        });
    });
}

fn bench_parse_typescript(c: &mut Criterion) {
    let options = ParseOptions::default().module().with_typescript(true);
    c.bench_function("parse_typescript_medium", |b| {
        b.iter(|| {
            let program = parse(black_box(TYPESCRIPT_SOURCE), &options);
            black_box(program).ok();
        });
    });
}

criterion_group!(benches, bench_parse_javascript, bench_parse_typescript);
criterion_main!(benches);
